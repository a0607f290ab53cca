use pawplanner_core::Dashboard;
use pawplanner_core::config::{Config, Palette};
use pawplanner_core::error::AppError;
use pawplanner_core::guide::CareGuide;
use pawplanner_core::model::{Appointment, MoodEntry, Pet, Task, TaskStatus};
use pawplanner_core::summary::appointment_badge;
use pawplanner_core::week::TaskView;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

const SHORT_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short] [month repr:short] [day padding:none]");
const LONG_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday], [month repr:long] [day padding:none], [year]");
const CALENDAR_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
const WEEK_COLUMN: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short] [day padding:none]");
const MOOD_STAMP: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [hour repr:12 padding:none]:[minute] [period]"
);

pub const WELCOME_TEXT: &str = "Welcome to PawPlanner!\n\
Keep track of feedings, walks and medication, log how your pet is feeling\n\
and never miss a vet visit. Type `help` for commands.";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Task")]
    title: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Tasks")]
    tasks: String,
}

#[derive(Tabled)]
struct MoodRow {
    #[tabled(rename = "Mood")]
    mood: &'static str,
    #[tabled(rename = "Logged")]
    logged: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct AppointmentRow {
    #[tabled(rename = "Appointment")]
    title: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "When")]
    badge: String,
}

#[derive(Tabled)]
struct PetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    species: String,
    #[tabled(rename = "Breed")]
    breed: String,
    #[tabled(rename = "Age")]
    age: String,
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Activity")]
    label: &'static str,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Progress")]
    percentage: String,
}

#[derive(Tabled)]
struct GuideRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Step")]
    title: &'static str,
    #[tabled(rename = "Done")]
    done: &'static str,
}

fn format_date(date: Date, format: &[BorrowedFormatItem<'_>]) -> Result<String, AppError> {
    date.format(format)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

fn dash_if_empty(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let rendered =
        serde_json::to_string(value).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn status_label(status: TaskStatus, palette: &Palette) -> String {
    match status {
        TaskStatus::Overdue => palette.alertize(status.as_str()),
        TaskStatus::Completed => palette.mutedize(status.as_str()),
        TaskStatus::Pending => status.as_str().to_string(),
    }
}

fn task_row(view: &TaskView) -> TaskRow {
    TaskRow {
        id: view.task.id.clone(),
        title: view.task.title.clone(),
        kind: view.task.task_type.as_str(),
        time: dash_if_empty(&view.task.scheduled_time),
        status: view.status.as_str(),
    }
}

pub fn print_today(
    dashboard: &Dashboard,
    now: PrimitiveDateTime,
    palette: &Palette,
    json: bool,
) -> Result<(), AppError> {
    let today = now.date();
    let views = dashboard.list_tasks_for_date(today, now);
    let summary = dashboard.today_progress(now);

    if json {
        return print_json(&serde_json::json!({
            "date": today,
            "tasks": views,
            "completed": summary.progress.completed,
            "total": summary.progress.total,
            "percentage": summary.progress.percentage(),
            "has_overdue": summary.has_overdue,
        }));
    }

    println!("{}", palette.accentize(&format!("Today - {}", format_date(today, SHORT_DAY)?)));
    if views.is_empty() {
        println!("No tasks scheduled for today!");
        return Ok(());
    }

    println!("{}", table(views.iter().map(task_row).collect()));
    let progress_line = format!(
        "Progress: {}/{} ({}%)",
        summary.progress.completed,
        summary.progress.total,
        summary.progress.percentage()
    );
    if summary.has_overdue {
        println!("{}", palette.alertize(&format!("{progress_line} - some tasks are overdue")));
    } else {
        println!("{}", palette.mutedize(&progress_line));
    }
    Ok(())
}

pub fn print_week(
    dashboard: &Dashboard,
    anchor: Date,
    now: PrimitiveDateTime,
    palette: &Palette,
    json: bool,
) -> Result<(), AppError> {
    let week = dashboard.list_tasks_for_week(anchor, now)?;
    if json {
        return print_json(&week);
    }

    println!(
        "{}",
        palette.accentize(&format!(
            "Week of {} - {}",
            format_date(week.week_start, CALENDAR_DAY)?,
            format_date(week.week_end(), CALENDAR_DAY)?
        ))
    );

    let mut rows = Vec::with_capacity(week.days.len());
    for day in &week.days {
        let mut label = format_date(day.date, WEEK_COLUMN)?;
        if day.is_today {
            label.push_str(" *");
        }
        let tasks = if day.tasks.is_empty() {
            "-".to_string()
        } else {
            day.tasks
                .iter()
                .map(|view| {
                    let mark = match view.status {
                        TaskStatus::Completed => "[x]",
                        TaskStatus::Overdue => "[!]",
                        TaskStatus::Pending => "[ ]",
                    };
                    let time = if view.task.scheduled_time.is_empty() {
                        String::new()
                    } else {
                        format!("{} ", view.task.scheduled_time)
                    };
                    format!("{mark} {time}{} ({})", view.task.title, view.task.id)
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        rows.push(DayRow {
            day: label,
            done: format!("{}/{}", day.completed_count(), day.tasks.len()),
            tasks,
        });
    }

    println!("{}", table(rows));
    Ok(())
}

pub fn print_task_detail(view: &TaskView, palette: &Palette, json: bool) -> Result<(), AppError> {
    if json {
        return print_json(view);
    }

    let task: &Task = &view.task;
    println!("{}", palette.accentize(&task.title));
    println!("ID:     {}", task.id);
    println!("Type:   {}", task.task_type);
    let when = format_date(task.scheduled_date, LONG_DAY)?;
    if task.scheduled_time.is_empty() {
        println!("When:   {when}");
    } else {
        println!("When:   {when} at {}", task.scheduled_time);
    }
    println!("Status: {}", status_label(view.status, palette));
    if let Some(notes) = task.notes.as_deref() {
        println!("Notes:  {notes}");
    }
    Ok(())
}

pub fn print_task_change(
    verb: &str,
    view: &TaskView,
    palette: &Palette,
    json: bool,
) -> Result<(), AppError> {
    if json {
        return print_json(view);
    }
    println!(
        "{verb} task: {} ({}) - {}",
        view.task.title,
        view.task.id,
        status_label(view.status, palette)
    );
    Ok(())
}

pub fn print_moods(entries: &[MoodEntry], json: bool) -> Result<(), AppError> {
    if json {
        return print_json(entries);
    }
    if entries.is_empty() {
        println!("No moods logged yet.");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        rows.push(MoodRow {
            mood: entry.mood.label(),
            logged: entry
                .logged_at
                .format(MOOD_STAMP)
                .map_err(|err| AppError::invalid_data(err.to_string()))?,
            note: entry.note.clone().unwrap_or_else(|| "-".to_string()),
        });
    }
    println!("{}", table(rows));
    Ok(())
}

pub fn print_appointments(
    appointments: &[&Appointment],
    today: Date,
    json: bool,
) -> Result<(), AppError> {
    if json {
        let payload: Vec<serde_json::Value> = appointments
            .iter()
            .map(|appointment| {
                serde_json::json!({
                    "id": appointment.id,
                    "title": appointment.title,
                    "date": appointment.date,
                    "time": appointment.time,
                    "location": appointment.location,
                    "notes": appointment.notes,
                    "badge": appointment_badge(appointment, today),
                })
            })
            .collect();
        return print_json(&payload);
    }
    if appointments.is_empty() {
        println!("No upcoming appointments.");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(appointments.len());
    for appointment in appointments {
        rows.push(AppointmentRow {
            title: appointment.title.clone(),
            date: format_date(appointment.date, CALENDAR_DAY)?,
            time: appointment.time.clone(),
            location: appointment.location.clone(),
            badge: appointment_badge(appointment, today).unwrap_or_else(|| "-".to_string()),
        });
    }
    println!("{}", table(rows));
    Ok(())
}

pub fn print_pets(pets: &[Pet], json: bool) -> Result<(), AppError> {
    if json {
        return print_json(pets);
    }
    let rows = pets
        .iter()
        .map(|pet| PetRow {
            id: pet.id.clone(),
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone().unwrap_or_else(|| "-".to_string()),
            age: pet
                .age
                .map(|age| age.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    println!("{}", table(rows));
    Ok(())
}

pub fn print_stats(
    dashboard: &Dashboard,
    config: &Config,
    now: PrimitiveDateTime,
    palette: &Palette,
    json: bool,
) -> Result<(), AppError> {
    let today = dashboard.today_progress(now);
    let activities = dashboard.activity_progress(now.date());
    let expression = dashboard.pet_expression(now);

    if json {
        let activity_payload: Vec<serde_json::Value> = activities
            .iter()
            .map(|activity| {
                serde_json::json!({
                    "activity": activity.label(),
                    "completed": activity.progress.completed,
                    "total": activity.progress.total,
                    "percentage": activity.progress.percentage(),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "pet_name": config.pet_name(),
            "expression": expression,
            "completed": today.progress.completed,
            "total": today.progress.total,
            "percentage": today.progress.percentage(),
            "has_overdue": today.has_overdue,
            "activities": activity_payload,
        }));
    }

    println!(
        "{} is {}",
        palette.accentize(config.pet_name()),
        expression.as_str()
    );
    println!(
        "Today's progress: {}/{} ({}%)",
        today.progress.completed,
        today.progress.total,
        today.progress.percentage()
    );
    let rows = activities
        .iter()
        .map(|activity| ActivityRow {
            label: activity.label(),
            done: format!("{}/{}", activity.progress.completed, activity.progress.total),
            percentage: format!("{}%", activity.progress.percentage()),
        })
        .collect();
    println!("{}", table(rows));
    Ok(())
}

pub fn print_guide(guide: &CareGuide, palette: &Palette, json: bool) -> Result<(), AppError> {
    let progress = guide.progress();
    let current = guide.current_step();

    if json {
        let steps: Vec<serde_json::Value> = guide
            .steps()
            .iter()
            .map(|step| {
                serde_json::json!({
                    "id": step.id,
                    "title": step.title,
                    "description": step.description,
                    "tips": step.tips,
                    "completed": guide.is_completed(step.id),
                    "current": step.id == current.id,
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "steps": steps,
            "current": current.id,
            "completed": progress.completed,
            "total": progress.total,
            "percentage": progress.percentage(),
            "finished": guide.is_finished(),
        }));
    }

    println!(
        "{}",
        palette.accentize(&format!(
            "Pet Care Guide - {} of {} completed ({}%)",
            progress.completed,
            progress.total,
            progress.percentage()
        ))
    );
    let rows = guide
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| GuideRow {
            number: if index == guide.current_index() {
                format!("{} *", index + 1)
            } else {
                (index + 1).to_string()
            },
            title: step.title,
            done: if guide.is_completed(step.id) { "yes" } else { "-" },
        })
        .collect();
    println!("{}", table(rows));

    println!("{}", current.title);
    println!("{}", palette.mutedize(current.description));
    for tip in current.tips {
        println!("  - {tip}");
    }
    if guide.is_finished() {
        println!("Congratulations! You've completed the pet care guide.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CALENDAR_DAY, MOOD_STAMP, SHORT_DAY, dash_if_empty, format_date};
    use time::macros::{date, datetime};

    #[test]
    fn dates_render_like_the_dashboard() {
        assert_eq!(format_date(date!(2025 - 11 - 10), SHORT_DAY).unwrap(), "Mon Nov 10");
        assert_eq!(
            format_date(date!(2025 - 11 - 05), CALENDAR_DAY).unwrap(),
            "November 5, 2025"
        );
        assert_eq!(
            datetime!(2025-11-10 19:05).format(MOOD_STAMP).unwrap(),
            "Nov 10, 7:05 PM"
        );
    }

    #[test]
    fn dash_if_empty_marks_missing_times() {
        assert_eq!(dash_if_empty("  "), "-");
        assert_eq!(dash_if_empty("8:00 AM"), "8:00 AM");
    }
}
