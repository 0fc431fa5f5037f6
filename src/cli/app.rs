//! CLI module for the divelog application
//!
//! This module turns parsed commands into logbook operations and renders
//! the results for the terminal.
use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use chrono::Local;
use console::style;
use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{
    bar_heights, describe_photo, dive_numbers, encode_photos, filter_by_type, format_distance,
    format_temp, Commands, Config, DistanceUnit, DiveArgs, DiveInput, DiveRecord, DiveType,
    KeyValueStore, Logbook, LogbookError, Result, Settings, SortKey, Submission, TempUnit,
    DATE_FORMAT, NOTES_PREVIEW_LEN,
};

/// Width of a full histogram bar, in characters.
const CHART_WIDTH: f64 = 30.0;

/// CLI Application handler - processes CLI commands against the logbook
pub struct App<S: KeyValueStore> {
    /// Loaded dives and display settings
    logbook: Logbook<S>,

    /// Application configuration
    config: Config,

    /// Where `config --set/--reset` writes to
    config_path: Option<PathBuf>,

    /// Whether to display verbose output
    verbose: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new CLI application with the given logbook and config
    pub fn new(logbook: Logbook<S>, config: Config, verbose: bool) -> Self {
        Self {
            logbook,
            config,
            config_path: Config::default_path(),
            verbose,
        }
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn logbook(&self) -> &Logbook<S> {
        &self.logbook
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add(fields) => self.handle_add(fields)?,

            Commands::Edit { id, fields } => self.handle_edit(id, fields)?,

            Commands::Show { id, json } => self.handle_show(&id, json)?,

            Commands::List {
                search,
                sort,
                dive_type,
                limit,
                json,
            } => self.handle_list(search.as_deref(), sort, dive_type, limit, json)?,

            Commands::Search {
                query,
                sort,
                limit,
                json,
            } => self.handle_list(Some(query.as_str()), sort, None, limit, json)?,

            Commands::Delete { id, force } => self.handle_delete(id, force)?,

            Commands::Stats { json } => self.handle_stats(json)?,

            Commands::Units { temp, distance } => self.handle_units(temp, distance)?,

            Commands::Config { show, set, reset } => self.handle_config(show, set, reset)?,
        }

        Ok(())
    }

    fn handle_add(&mut self, fields: DiveArgs) -> Result<()> {
        let mut input = DiveInput {
            date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
            ..DiveInput::default()
        };
        fields.apply_to(&mut input);
        self.complete_form(&fields, &mut input)?;

        let dive = match self.logbook.submit(&input, None)? {
            Submission::Created(dive) | Submission::Updated(dive) => dive,
            Submission::Unchanged => return Ok(()),
        };

        println!("Dive logged with ID: {}", style(&dive.id).bold());
        self.report_stored(&dive);
        Ok(())
    }

    fn handle_edit(&mut self, id: String, fields: DiveArgs) -> Result<()> {
        let mut input = self
            .logbook
            .edit_form(&id)
            .ok_or_else(|| LogbookError::DiveNotFound { id: id.clone() })?;
        fields.apply_to(&mut input);
        self.complete_form(&fields, &mut input)?;

        match self.logbook.submit(&input, Some(id.as_str()))? {
            Submission::Updated(dive) | Submission::Created(dive) => {
                println!(
                    "Dive {} updated ({} photo{})",
                    dive.id,
                    dive.photos.len(),
                    if dive.photos.len() == 1 { "" } else { "s" }
                );
                self.report_stored(&dive);
            }
            Submission::Unchanged => return Err(LogbookError::DiveNotFound { id }),
        }
        Ok(())
    }

    /// Fills in the parts of a form that need I/O: editor notes and photos.
    fn complete_form(&self, fields: &DiveArgs, input: &mut DiveInput) -> Result<()> {
        if fields.edit {
            let title = if input.dive_site.is_empty() {
                "New dive".to_string()
            } else {
                input.dive_site.clone()
            };
            input.notes = self.open_editor_for_notes(&title, &input.notes)?;
        }
        input.photos = encode_photos(&fields.photos)?;
        if !input.photos.is_empty() {
            debug!("Attached {} new photos", input.photos.len());
        }
        Ok(())
    }

    fn report_stored(&self, dive: &DiveRecord) {
        if !self.verbose {
            return;
        }
        println!(
            "Stored in metric: depth {} m, water temp {}, visibility {}",
            dive.max_depth,
            dive.water_temp
                .map(|t| format!("{} °C", t))
                .unwrap_or_else(|| "-".to_string()),
            dive.visibility
                .map(|v| format!("{} m", v))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    fn open_editor_for_notes(&self, title: &str, existing: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".txt").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        {
            let mut file = OpenOptions::new().write(true).open(&temp_path)?;
            writeln!(file, "# Notes for: {}", title)?;
            writeln!(
                file,
                "# Lines starting with '#' are ignored. Save and exit when done."
            )?;
            if !existing.is_empty() {
                writeln!(file, "{}", existing)?;
            }
        }

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor to write dive notes. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(strip_editor_comments(&content))
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let args = split(editor_cmd).map_err(|e| LogbookError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        let Some((program, rest)) = args.split_first() else {
            return Err(LogbookError::EditorError {
                message: "Empty editor command".to_string(),
            });
        };

        let status = Command::new(program).args(rest).arg(file_path).status()?;

        if !status.success() {
            return Err(LogbookError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }

    fn handle_show(&self, id: &str, json: bool) -> Result<()> {
        let dive = self
            .logbook
            .dive(id)
            .ok_or_else(|| LogbookError::DiveNotFound { id: id.to_string() })?;

        if json {
            println!("{}", serde_json::to_string_pretty(dive)?);
            return Ok(());
        }

        let settings = self.logbook.settings();
        let numbers = dive_numbers(self.logbook.dives());
        let number = numbers.get(dive.id.as_str()).copied().unwrap_or_default();

        println!("{}", style(format!("Dive #{}", number)).cyan().bold());
        println!("ID:         {}", dive.id);
        println!("Site:       {}", style(&dive.dive_site).bold());
        println!("Location:   {}", dive.location);
        match dive.time {
            Some(time) => println!(
                "Date:       {} {}",
                dive.date.format("%B %-d, %Y"),
                time.format("%H:%M")
            ),
            None => println!("Date:       {}", dive.date.format("%B %-d, %Y")),
        }
        println!("Type:       {}", dive.dive_type);
        println!(
            "Max depth:  {}",
            format_distance(dive.max_depth, settings.distance_unit)
        );
        println!("Duration:   {} min", dive.duration);
        if let Some(temp) = dive.water_temp {
            println!("Water temp: {}", format_temp(temp, settings.temp_unit));
        }
        if let Some(visibility) = dive.visibility {
            println!(
                "Visibility: {}",
                format_distance(visibility, settings.distance_unit)
            );
        }
        if let Some(buddy) = &dive.buddy {
            println!("Buddy:      {}", buddy);
        }
        if let Some(notes) = &dive.notes {
            println!("\n{}", notes);
        }
        if !dive.photos.is_empty() {
            println!("\nPhotos:");
            for (i, photo) in dive.photos.iter().enumerate() {
                match describe_photo(photo) {
                    Some((mime, size)) => println!("  {}. {} ({} bytes)", i + 1, mime, size),
                    None => println!("  {}. (unreadable image data)", i + 1),
                }
            }
        }

        Ok(())
    }

    fn handle_list(
        &self,
        search: Option<&str>,
        sort: Option<SortKey>,
        dive_type: Option<DiveType>,
        limit: Option<usize>,
        json: bool,
    ) -> Result<()> {
        let key = sort.unwrap_or(self.config.default_sort);
        let mut dives = self.logbook.query(search, key);
        if let Some(dive_type) = dive_type {
            dives = filter_by_type(dives, dive_type);
        }

        let matched = dives.len();
        let limit = limit.unwrap_or(self.config.list_limit);
        if limit > 0 && dives.len() > limit {
            dives.truncate(limit);
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&dives)?);
            return Ok(());
        }

        if dives.is_empty() {
            match search {
                Some(term) if !term.trim().is_empty() => {
                    println!("No dives found matching: \"{}\"", term)
                }
                _ if self.logbook.dives().is_empty() => {
                    println!("No dives logged yet. Start by adding your first dive!")
                }
                _ => println!("No dives found matching the criteria."),
            }
            return Ok(());
        }

        let settings = self.logbook.settings();
        let numbers = dive_numbers(self.logbook.dives());
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, dive) in dives.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }
            let number = numbers.get(dive.id.as_str()).copied().unwrap_or_default();
            self.print_dive_card(dive, number, &settings);
        }

        if dives.len() < matched {
            println!(
                "\nShowing {} of {} dives. Use --limit to show more.",
                dives.len(),
                matched
            );
        } else {
            println!(
                "\nFound {} dive{}",
                matched,
                if matched == 1 { "" } else { "s" }
            );
        }

        Ok(())
    }

    fn print_dive_card(&self, dive: &DiveRecord, number: usize, settings: &Settings) {
        println!(
            "{}  {}",
            style(format!("Dive #{}", number)).cyan(),
            style(format!("ID: {}", dive.id)).dim()
        );
        println!("{}", style(&dive.dive_site).bold());
        println!("{}", dive.date.format("%B %-d, %Y"));
        println!(
            "Max depth: {} | Duration: {} min | Location: {} | Type: {}",
            format_distance(dive.max_depth, settings.distance_unit),
            dive.duration,
            dive.location,
            dive.dive_type
        );
        if let Some(preview) = dive.notes_preview(NOTES_PREVIEW_LEN) {
            println!("{}", style(preview).dim());
        }
        if !dive.photos.is_empty() {
            println!("Photos: {}", dive.photos.len());
        }
    }

    fn handle_delete(&mut self, id: String, force: bool) -> Result<()> {
        let dive = self
            .logbook
            .dive(&id)
            .cloned()
            .ok_or_else(|| LogbookError::DiveNotFound { id: id.clone() })?;

        if !force {
            let settings = self.logbook.settings();
            println!("You are about to delete the following dive:");
            println!("ID:       {}", dive.id);
            println!("Site:     {}", dive.dive_site);
            println!("Location: {}", dive.location);
            println!("Date:     {}", dive.date.format("%Y-%m-%d"));
            println!(
                "Depth:    {}",
                format_distance(dive.max_depth, settings.distance_unit)
            );

            println!("\nThis action cannot be undone!");
            if !confirm("Are you sure you want to delete this dive? [y/N]: ")? {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        if self.logbook.remove(&id)? {
            println!(
                "Dive at '{}' ({}) has been permanently deleted.",
                dive.dive_site, dive.id
            );
        }

        Ok(())
    }

    fn handle_stats(&self, json: bool) -> Result<()> {
        let summary = self.logbook.summary();
        let months = self.logbook.histogram(Local::now().date_naive());

        if json {
            let value = serde_json::json!({
                "summary": summary,
                "months": months,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        if summary.total_dives == 0 {
            println!("No statistics yet. Add some dives to see your stats!");
            return Ok(());
        }

        let units = self.logbook.settings().distance_unit;
        println!("{}", style("Your Diving Statistics").bold());
        println!("Total dives: {}", summary.total_dives);
        println!("Max depth:   {}", format_distance(summary.max_depth, units));
        println!("Total time:  {} minutes", summary.total_time);
        println!("Avg depth:   {}", format_distance(summary.avg_depth, units));

        println!("\n{}", style("Dives per Month (Last 6 Months)").bold());
        for (month, height) in months.iter().zip(bar_heights(&months)) {
            let bar = "█".repeat((height / 100.0 * CHART_WIDTH).round() as usize);
            println!(
                "{} {:>3} {}",
                month.label,
                month.count,
                style(bar).cyan()
            );
        }

        Ok(())
    }

    fn handle_units(&mut self, temp: Option<TempUnit>, distance: Option<DistanceUnit>) -> Result<()> {
        let settings = if temp.is_none() && distance.is_none() {
            self.logbook.settings()
        } else {
            self.logbook.set_units(temp, distance)?
        };

        println!(
            "Temperature: {} ({})",
            settings.temp_unit,
            settings.temp_unit.symbol()
        );
        println!(
            "Distance:    {} ({})",
            settings.distance_unit,
            settings.distance_unit.symbol()
        );
        println!(
            "{}",
            style("All data is stored in metric units; these settings only change display and input.")
                .dim()
        );
        Ok(())
    }

    fn handle_config(&mut self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        if reset || set.is_some() {
            let path = self
                .config_path
                .clone()
                .ok_or_else(|| LogbookError::ConfigError {
                    message: "No location for the configuration file; use --config".to_string(),
                })?;

            if reset {
                self.config = Config::default();
            }
            if let Some(assignment) = set {
                self.config.set(&assignment)?;
            }
            self.config.save(&path)?;
            println!("Configuration saved to {}", path.display());
        }

        if show || !reset {
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }
        Ok(())
    }
}

/// Asks a yes/no question on stdin; anything but y/yes means no.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    stdout().flush().map_err(LogbookError::Io)?;

    let mut input = String::new();
    stdin().read_line(&mut input).map_err(LogbookError::Io)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

/// Drops `#` comment lines from editor output and trims surrounding blank lines.
fn strip_editor_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<&str>>()
        .join("\n")
        .trim()
        .to_string()
}
