//! Some utility functions, mostly to pretty-print data on a terminal

use chrono::NaiveDate;

use crate::board::StatusBoard;
use crate::calendar::{MonthGrid, WEEKDAY_LABELS};
use crate::dashboard::Dashboard;
use crate::quick_task::QuickTask;
use crate::stats::Stats;
use crate::status::TaskStatus;
use crate::task::Task;

/// How many badges a calendar cell shows before summarizing the rest as "+N"
pub const BADGES_PER_DAY: usize = 2;
/// How many characters of a task title fit in a calendar badge
pub const BADGE_TITLE_CHARS: usize = 5;

/// A debug utility that pretty-prints a month grid, one line per week
pub fn print_month_grid(grid: &MonthGrid, today: NaiveDate) {
    println!("{:^84}", grid.month().to_string());
    for label in WEEKDAY_LABELS.iter() {
        print!("{:<12}", label);
    }
    println!();

    for week in grid.weeks() {
        for day in week {
            let marker = if day.is_today(today) {
                '*'
            } else if day.is_current_month() {
                ' '
            } else {
                '.'
            };
            print!("{}{:<11}", marker, day.date().format("%d").to_string());
        }
        println!();

        let lines = week.iter()
            .map(|day| day.preview(BADGES_PER_DAY).0.len() + 1)
            .max()
            .unwrap_or(0);
        for line in 0..lines {
            for day in week {
                print!("{:<12}", badge_line(day.preview(BADGES_PER_DAY), line));
            }
            println!();
        }
    }
}

fn badge_line((shown, hidden): (&[Task], usize), line: usize) -> String {
    if let Some(task) = shown.get(line) {
        return format!(" {}", task.short_title(BADGE_TITLE_CHARS));
    }
    if line == shown.len() && hidden > 0 {
        return format!(" +{}", hidden);
    }
    String::new()
}

pub fn print_board(board: &StatusBoard) {
    for (status, tasks) in board.columns() {
        println!("{} ({})", status.title(), tasks.len());
        for task in tasks {
            print_task(task);
        }
    }
}

pub fn print_stats(stats: &Stats) {
    for status in TaskStatus::ALL.iter() {
        println!("    {:<8}{}", status.title(), stats.count_by_status[*status]);
    }
    println!("    Total   {}", stats.total_count);
    println!("    Completion {} ({} remaining, {} active)", stats.format_percentage(), stats.remaining_count, stats.active_count);
    println!("    Margin  {}", stats.format_margin());
}

pub fn print_task(task: &Task) {
    let completion = if task.status() == TaskStatus::Done { "✓" } else { " " };
    let due = match (task.due_date(), task.time()) {
        (Some(date), Some(time)) => format!("{} {}", date, time.format("%H:%M")),
        (Some(date), None) => date.to_string(),
        (None, _) => "no date".to_string(),
    };
    println!("    {} {}\t{}\t{}", completion, task.title(), due, task.id());
}

pub fn print_quick_task(quick_task: &QuickTask) {
    let completion = if quick_task.completed() { "✓" } else { " " };
    println!("    {} {}\t{}", completion, quick_task.title(), quick_task.id());
}

pub fn print_dashboard(dashboard: &Dashboard) {
    println!("{}", dashboard.greeting);
    println!();
    println!("Statistics");
    print_stats(&dashboard.stats);

    let (done, total) = dashboard.goal_progress();
    println!("Goals of the month ({}/{})", done, total);
    dashboard.goals.iter().for_each(print_quick_task);
    println!("Quick tasks");
    dashboard.quick_tasks.iter().for_each(print_quick_task);
    println!("Reminders");
    dashboard.reminders.iter().for_each(print_task);
}
