mod cli;
mod logging;
mod render;

use clap::{CommandFactory, Parser};
use cli::{Cli, Command, collect_overrides};
use pawplanner_core::config::{self, Config, merge_overrides, palette_for_theme};
use pawplanner_core::error::AppError;
use pawplanner_core::events::DashboardEvent;
use pawplanner_core::model::{NewPet, NewTask, TaskType};
use pawplanner_core::status::local_now;
use pawplanner_core::storage::{
    JsonFilePreferences, MemoryPreferences, Preferences, mark_welcome_seen, welcome_seen,
};
use pawplanner_core::week::shift_week;
use pawplanner_core::{Dashboard, DashboardSettings};
use std::io::{self, BufRead};
use time::Date;
use time::macros::format_description;

/// One dashboard session: everything lives until the process exits, apart
/// from the welcome flag in the preference file.
struct Session {
    dashboard: Dashboard,
    base_config: Config,
    prefs: Box<dyn Preferences>,
}

impl Session {
    fn start() -> Result<Self, AppError> {
        let loaded = config::load_config_with_fallback();
        if let Some(err) = loaded.error {
            eprintln!("WARNING: config ignored: {err}");
        }
        let mut dashboard = Dashboard::seeded(&loaded.config, local_now())?;
        dashboard.subscribe(|event: &DashboardEvent| {
            log::debug!("event={} module=cli status=ok", event.name());
        });
        let prefs = open_preferences();

        Ok(Self {
            dashboard,
            base_config: loaded.config,
            prefs,
        })
    }
}

/// Falls back to preferences that last for this session only when no
/// preference file location can be resolved.
fn open_preferences() -> Box<dyn Preferences> {
    match JsonFilePreferences::from_env() {
        Ok(prefs) => Box::new(prefs),
        Err(err) => {
            log::warn!(
                "event=preferences_open module=cli status=fallback code={} message={}",
                err.code(),
                err.message()
            );
            Box::new(MemoryPreferences::new())
        }
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn parse_date(raw: &str) -> Result<Date, AppError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw.trim(), &format)
        .map_err(|_| AppError::invalid_input("date must be YYYY-MM-DD"))
}

fn not_found(id: &str) -> AppError {
    AppError::not_found(format!("task '{}' not found", id.trim()))
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(session: &mut Session, cli: Cli) -> Result<(), AppError> {
    let overrides = collect_overrides(&cli.config_override)?;
    let config = merge_overrides(&session.base_config, &overrides);
    let palette = palette_for_theme(config.theme.as_deref());
    session
        .dashboard
        .apply_settings(DashboardSettings::from(&config));

    let now = local_now();
    let json = cli.json;
    let dashboard = &mut session.dashboard;

    match cli.command {
        Command::Today => render::print_today(dashboard, now, &palette, json)?,
        Command::Week { offset, date } => {
            let base = match date.as_deref() {
                Some(raw) => parse_date(raw)?,
                None => now.date(),
            };
            let anchor = shift_week(base, offset)?;
            render::print_week(dashboard, anchor, now, &palette, json)?;
        }
        Command::Add {
            title,
            task_type,
            date,
            time,
            notes,
        } => {
            let title = match title {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_input("title is required")),
            };
            let task_type = task_type
                .as_deref()
                .ok_or_else(|| AppError::invalid_input("type is required"))?
                .parse::<TaskType>()?;
            let scheduled_date = match date.as_deref() {
                Some(raw) => parse_date(raw)?,
                None => now.date(),
            };

            let mut candidate = NewTask::new(title, task_type, scheduled_date);
            if let Some(time) = time {
                candidate = candidate.at(time);
            }
            if let Some(notes) = notes {
                candidate = candidate.with_notes(notes);
            }

            let task = dashboard.add_task(candidate)?;
            let view = dashboard.view_task(&task.id, now).ok_or_else(|| not_found(&task.id))?;
            render::print_task_change("Added", &view, &palette, json)?;
        }
        Command::Toggle { id } => {
            let task = dashboard.toggle_complete(&id)?.ok_or_else(|| not_found(&id))?;
            let view = dashboard.view_task(&task.id, now).ok_or_else(|| not_found(&id))?;
            let verb = if task.completed { "Completed" } else { "Reopened" };
            render::print_task_change(verb, &view, &palette, json)?;
        }
        Command::Delete { id } => {
            let task = dashboard.delete_task(&id)?.ok_or_else(|| not_found(&id))?;
            if json {
                render::print_json(&task)?;
            } else {
                println!("Deleted task: {} ({})", task.title, task.id);
            }
        }
        Command::Show { id } => {
            let view = dashboard.view_task(&id, now).ok_or_else(|| not_found(&id))?;
            render::print_task_detail(&view, &palette, json)?;
        }
        Command::Mood { mood, note } => {
            let mood = mood.parse()?;
            let entry = dashboard.log_mood(mood, note.as_deref());
            if json {
                render::print_json(&entry)?;
            } else {
                println!("Mood logged: {} is feeling {}", config.pet_name(), entry.mood.label());
            }
        }
        Command::Moods => render::print_moods(&dashboard.list_mood_entries(), json)?,
        Command::Appointments => {
            render::print_appointments(&dashboard.appointments(), now.date(), json)?
        }
        Command::Pets => render::print_pets(dashboard.pets(), json)?,
        Command::AddPet {
            name,
            species,
            breed,
            age,
        } => {
            let pet = dashboard.add_pet(NewPet {
                name,
                species,
                breed,
                age,
            })?;
            if json {
                render::print_json(&pet)?;
            } else {
                println!("Added pet: {} ({})", pet.name, pet.id);
            }
        }
        Command::Stats => render::print_stats(dashboard, &config, now, &palette, json)?,
        Command::Guide { step, complete } => {
            if let Some(number) = step {
                let index = number
                    .checked_sub(1)
                    .ok_or_else(|| AppError::invalid_input("guide step must be between 1 and 4"))?;
                dashboard.select_guide_step(index)?;
            }
            if let Some(id) = complete {
                let done = dashboard.complete_guide_step(&id)?;
                if !json {
                    println!("Completed guide step: {}", done.title);
                }
            }
            render::print_guide(dashboard.guide(), &palette, json)?;
        }
        Command::Welcome { dismiss } => {
            if dismiss {
                mark_welcome_seen(session.prefs.as_mut())?;
                println!("Welcome message dismissed.");
            } else {
                println!("{}", render::WELCOME_TEXT);
            }
        }
    }

    Ok(())
}

fn greet(session: &Session) {
    match welcome_seen(session.prefs.as_ref()) {
        Ok(true) => {}
        Ok(false) => {
            println!("{}", render::WELCOME_TEXT);
            println!("(run `welcome --dismiss` to hide this message)");
        }
        Err(err) => log::warn!(
            "event=welcome_check module=cli status=error code={} message={}",
            err.code(),
            err.message()
        ),
    }
}

fn run_interactive() -> Result<(), AppError> {
    let mut session = Session::start()?;
    greet(&session);

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("pawplanner".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(&mut session, cli) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    let _logger = match logging::init_logging() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("WARNING: logging disabled: {err}");
            None
        }
    };

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                err.exit();
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let result = Session::start().and_then(|mut session| run_command(&mut session, cli));
    if let Err(err) = result {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
