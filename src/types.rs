//! Shared result type and the command-line surface.
//!
//! The subcommands map onto logbook operations; see `cli::App` for how each
//! one is carried out.
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::{DistanceUnit, DiveInput, DiveType, LogbookError, SortKey, TempUnit};

/// A specialized Result type for divelog operations.
pub type Result<T> = std::result::Result<T, LogbookError>;

/// Dive form fields, entered in the current display units.
///
/// Every field is optional so the same set serves both `add` and `edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct DiveArgs {
    /// Date of the dive (YYYY-MM-DD); `add` defaults to today
    #[clap(short, long)]
    pub date: Option<String>,

    /// Entry time (HH:MM)
    #[clap(long)]
    pub time: Option<String>,

    /// Region or destination, e.g. "Great Barrier Reef"
    #[clap(short, long)]
    pub location: Option<String>,

    /// Dive site name, e.g. "Blue Corner"
    #[clap(short, long)]
    pub site: Option<String>,

    /// Maximum depth in the display distance unit
    #[clap(long)]
    pub depth: Option<String>,

    /// Bottom time in minutes
    #[clap(long)]
    pub duration: Option<String>,

    /// Water temperature in the display temperature unit
    #[clap(long, allow_hyphen_values = true)]
    pub temp: Option<String>,

    /// Visibility in the display distance unit
    #[clap(long)]
    pub visibility: Option<String>,

    /// Dive buddy
    #[clap(short, long)]
    pub buddy: Option<String>,

    /// Kind of dive
    #[clap(short = 't', long = "type")]
    pub dive_type: Option<DiveType>,

    /// Free-text notes
    #[clap(short, long)]
    pub notes: Option<String>,

    /// Image files to attach (repeatable)
    #[clap(short, long = "photo")]
    pub photos: Vec<PathBuf>,

    /// Write the notes in an editor before saving
    #[clap(short, long)]
    pub edit: bool,
}

impl DiveArgs {
    /// Overwrites the form fields that were given on the command line.
    ///
    /// Photos are not touched; they need reading from disk first.
    pub fn apply_to(&self, input: &mut DiveInput) {
        let fields = [
            (&self.date, &mut input.date),
            (&self.time, &mut input.time),
            (&self.location, &mut input.location),
            (&self.site, &mut input.dive_site),
            (&self.depth, &mut input.max_depth),
            (&self.duration, &mut input.duration),
            (&self.temp, &mut input.water_temp),
            (&self.visibility, &mut input.visibility),
            (&self.buddy, &mut input.buddy),
            (&self.notes, &mut input.notes),
        ];
        for (given, field) in fields {
            if let Some(value) = given {
                *field = value.clone();
            }
        }
        if self.dive_type.is_some() {
            input.dive_type = self.dive_type;
        }
    }
}

/// Available subcommands for the divelog application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a new dive
    Add(DiveArgs),

    /// Change an existing dive; unspecified fields keep their values
    Edit {
        /// ID of the dive to edit
        id: String,

        #[clap(flatten)]
        fields: DiveArgs,
    },

    /// Show one dive in full
    Show {
        /// ID of the dive to show
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List dives, newest first unless sorted otherwise
    List {
        /// Only dives whose date, site, location or notes contain this text
        #[clap(short, long)]
        search: Option<String>,

        /// Ordering of the listing
        #[clap(long)]
        sort: Option<SortKey>,

        /// Only dives of this kind
        #[clap(short = 't', long = "type")]
        dive_type: Option<DiveType>,

        /// Limit the number of dives shown (0 for all)
        #[clap(short = 'n', long)]
        limit: Option<usize>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Search dives by date (YYYY-MM-DD), site, location or notes
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Ordering of the results
        #[clap(long)]
        sort: Option<SortKey>,

        /// Limit the number of search results (0 for all)
        #[clap(short = 'n', long)]
        limit: Option<usize>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Delete a dive by ID
    Delete {
        /// ID of the dive to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Totals, averages and dives per month
    Stats {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Show or change display units
    Units {
        /// Temperature unit
        #[clap(long)]
        temp: Option<TempUnit>,

        /// Distance unit for depth and visibility
        #[clap(long)]
        distance: Option<DistanceUnit>,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
