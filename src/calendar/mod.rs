//! Month calendars: a fixed grid of six weeks, with tasks assigned to their days

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, NaiveDate};

use crate::task::Task;

/// Any month fits in six full weeks
pub const GRID_CELLS: usize = 42;

/// Column headers. Weeks start on Monday.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

// Keeps a few months of margin inside chrono's supported range, for the padding days
const MIN_YEAR: i32 = -262_000;
const MAX_YEAR: i32 = 262_000;


/// A month of a given year. Months are 0-based (January is 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    /// Create a normalized month: `month0` values past 11 roll over into the following years,
    /// so that `YearMonth::new(2023, 12)` is January 2024.
    pub fn new(year: i32, month0: u32) -> Self {
        let year = year.saturating_add((month0 / 12) as i32);
        Self {
            year: year.clamp(MIN_YEAR, MAX_YEAR),
            month0: month0 % 12,
        }
    }

    /// The month a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0())
    }

    pub fn year(&self) -> i32 { self.year }
    pub fn month0(&self) -> u32 { self.month0 }

    /// The following month. This saturates at the end of the supported range.
    pub fn next(&self) -> Self {
        if self.year == MAX_YEAR && self.month0 == 11 {
            return *self;
        }
        Self::new(self.year, self.month0 + 1)
    }

    /// The previous month. This saturates at the start of the supported range.
    pub fn prev(&self) -> Self {
        match (self.year, self.month0) {
            (MIN_YEAR, 0) => *self,
            (year, 0) => Self::new(year - 1, 11),
            (year, month0) => Self::new(year, month0 - 1),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
            .unwrap(/* this cannot panic since the year is clamped and the month normalized in `new` */)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month0 {
            1 if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() => 29,
            1 => 28,
            3 | 5 | 8 | 10 => 30,
            _ => 31,
        }
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}


/// One cell of a month grid. This is derived data, rebuilt whenever tasks change.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarDay {
    date: NaiveDate,
    tasks: Vec<Task>,
    is_current_month: bool,
}

impl CalendarDay {
    fn padding(date: NaiveDate) -> Self {
        Self { date, tasks: Vec::new(), is_current_month: false }
    }

    pub fn date(&self) -> NaiveDate { self.date }
    /// The tasks due on this day, in the order they were given to the builder
    pub fn tasks(&self) -> &[Task] { &self.tasks }
    /// `false` for the days of the adjacent months that pad the grid
    pub fn is_current_month(&self) -> bool { self.is_current_month }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    /// The first `limit` tasks, and how many more there are
    pub fn preview(&self, limit: usize) -> (&[Task], usize) {
        let shown = limit.min(self.tasks.len());
        (&self.tasks[..shown], self.tasks.len() - shown)
    }
}


/// A month as displayed in a calendar: 6 weeks of 7 days, Monday first
#[derive(Clone, Debug, PartialEq)]
pub struct MonthGrid {
    month: YearMonth,
    days: Vec<CalendarDay>,
}

impl MonthGrid {
    /// Build the grid of `month`, assigning to each of its days the tasks due on that day.
    ///
    /// Tasks due outside of the month (including on the padding days) are not shown.
    pub fn build(month: YearMonth, tasks: &[Task]) -> Self {
        let first = month.first_day();
        let leading = first.weekday().num_days_from_monday() as usize;
        let n_days = month.days_in_month() as usize;

        let mut days = Vec::with_capacity(GRID_CELLS);
        for offset in (1..=leading).rev() {
            days.push(CalendarDay::padding(first - Duration::days(offset as i64)));
        }
        for day0 in 0..n_days {
            days.push(CalendarDay {
                date: first + Duration::days(day0 as i64),
                tasks: Vec::new(),
                is_current_month: true,
            });
        }

        for task in tasks {
            match task.due_date() {
                Some(due) if month.contains(due) => {
                    days[leading + due.day0() as usize].tasks.push(task.clone());
                },
                _ => {},
            }
        }

        let following = first + Duration::days(n_days as i64);
        let trailing = GRID_CELLS - days.len();
        for offset in 0..trailing {
            days.push(CalendarDay::padding(following + Duration::days(offset as i64)));
        }

        log::trace!("Built the grid of {} ({} leading, {} trailing days)", month, leading, trailing);
        Self { month, days }
    }

    pub fn month(&self) -> YearMonth { self.month }

    /// The 42 days, in display order
    pub fn days(&self) -> &[CalendarDay] { &self.days }

    pub fn into_days(self) -> Vec<CalendarDay> { self.days }

    /// The six rows of the grid
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarDay> {
        self.days.chunks(WEEKDAY_LABELS.len())
    }

    /// The cell of a date, if it is displayed
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn current_month_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|day| day.is_current_month)
    }
}

/// Build the 42 cells displaying a month.
///
/// `month` is 0-based. See [`MonthGrid::build`].
pub fn build_month_grid(year: i32, month: u32, tasks: &[Task]) -> Vec<CalendarDay> {
    MonthGrid::build(YearMonth::new(year, month), tasks).into_days()
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leading_padding(days: &[CalendarDay]) -> usize {
        days.iter().take_while(|d| d.is_current_month() == false).count()
    }

    #[test]
    fn always_42_cells_with_one_run_of_current_days() {
        for year in 1899..2101 {
            for month0 in 0..12 {
                let days = build_month_grid(year, month0, &[]);
                let ym = YearMonth::new(year, month0);
                assert_eq!(days.len(), GRID_CELLS);

                let leading = leading_padding(&days);
                let n_current = days.iter().filter(|d| d.is_current_month()).count();
                assert_eq!(n_current as u32, ym.days_in_month());
                assert!(days[leading..leading + n_current].iter().all(|d| d.is_current_month()));
                assert!(days[leading + n_current..].iter().all(|d| d.is_current_month() == false));

                assert!(leading < 7);
                assert_eq!(days[leading].date(), ym.first_day());
                for pair in days.windows(2) {
                    assert_eq!(pair[0].date().succ_opt().unwrap(), pair[1].date());
                }
            }
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(YearMonth::new(2024, 1).days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 1).days_in_month(), 28);
        assert_eq!(YearMonth::new(1900, 1).days_in_month(), 28);
        assert_eq!(YearMonth::new(2000, 1).days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 3).days_in_month(), 30);
        assert_eq!(YearMonth::new(2023, 11).days_in_month(), 31);
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_padding() {
        // January 1st, 2024 is a Monday
        let days = build_month_grid(2024, 0, &[]);
        assert_eq!(leading_padding(&days), 0);
        assert_eq!(days[0].date(), date(2024, 1, 1));

        // February 2021 starts on a Monday and fills exactly four weeks
        let days = build_month_grid(2021, 1, &[]);
        assert_eq!(leading_padding(&days), 0);
        assert_eq!(days.iter().filter(|d| d.is_current_month() == false).count(), 14);
    }

    #[test]
    fn thirty_day_month_starting_on_wednesday() {
        // November 1st, 2023 is a Wednesday
        let days = build_month_grid(2023, 10, &[]);
        assert_eq!(leading_padding(&days), 2);
        assert_eq!(days[0].date(), date(2023, 10, 30));
        assert_eq!(days[1].date(), date(2023, 10, 31));
        assert_eq!(days.iter().filter(|d| d.is_current_month()).count(), 30);
        assert_eq!(days[32..].iter().filter(|d| d.is_current_month() == false).count(), 10);
        assert_eq!(days[41].date(), date(2023, 12, 10));
    }

    #[test]
    fn month_starting_on_sunday_is_padded_by_six_days() {
        // September 1st, 2024 is a Sunday
        let days = build_month_grid(2024, 8, &[]);
        assert_eq!(leading_padding(&days), 6);
        assert_eq!(days[6].date(), date(2024, 9, 1));
    }

    #[test]
    fn tasks_land_on_their_day_only() {
        let tasks = vec![
            Task::new(1, "first").with_due_date(date(2023, 11, 15)),
            Task::new(2, "timed").with_due_date(date(2023, 11, 15)).with_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap()),
            Task::new(3, "last day").with_due_date(date(2023, 11, 30)),
            Task::new(4, "on a leading padding day").with_due_date(date(2023, 10, 31)),
            Task::new(5, "on a trailing padding day").with_due_date(date(2023, 12, 3)),
            Task::new(6, "far away").with_due_date(date(2025, 11, 15)),
            Task::new(7, "undated"),
        ];
        let grid = MonthGrid::build(YearMonth::new(2023, 10), &tasks);

        let ids = |d: NaiveDate| -> Vec<String> {
            grid.day(d).unwrap().tasks().iter().map(|t| t.id().to_string()).collect()
        };
        assert_eq!(ids(date(2023, 11, 15)), vec!["1", "2"]);
        assert_eq!(ids(date(2023, 11, 30)), vec!["3"]);
        assert!(ids(date(2023, 10, 31)).is_empty());
        assert!(ids(date(2023, 12, 3)).is_empty());

        let total: usize = grid.days().iter().map(|d| d.tasks().len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn input_order_is_kept_within_a_day() {
        let day = date(2024, 6, 10);
        let tasks: Vec<Task> = (0..5).rev().map(|i| Task::new(i, format!("t{}", i)).with_due_date(day)).collect();
        let grid = MonthGrid::build(YearMonth::containing(day), &tasks);
        let titles: Vec<&str> = grid.day(day).unwrap().tasks().iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["t4", "t3", "t2", "t1", "t0"]);

        let (shown, hidden) = grid.day(day).unwrap().preview(2);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].title(), "t4");
        assert_eq!(hidden, 3);
        assert_eq!(grid.day(date(2024, 6, 11)).unwrap().preview(2).1, 0);
    }

    #[test]
    fn months_roll_over() {
        assert_eq!(build_month_grid(2023, 12, &[]), build_month_grid(2024, 0, &[]));
        assert_eq!(YearMonth::new(2023, 25), YearMonth::new(2025, 1));
        assert_eq!(YearMonth::new(2024, 0).prev(), YearMonth::new(2023, 11));
        assert_eq!(YearMonth::new(2023, 11).next(), YearMonth::new(2024, 0));
        assert_eq!(YearMonth::new(2024, 4).to_string(), "May 2024");
    }

    #[test]
    fn both_ends_of_the_year_range() {
        let last = YearMonth::new(MAX_YEAR, 11);
        assert_eq!(last.next(), last);
        assert_eq!(YearMonth::new(i32::MAX, 11), last);
        assert_eq!(last.days_in_month(), 31);
        let days = build_month_grid(MAX_YEAR, 11, &[]);
        assert_eq!(days.len(), GRID_CELLS);
        assert_eq!(days.iter().filter(|d| d.is_current_month()).count(), 31);
        assert_eq!(days[41].date().year(), MAX_YEAR + 1);

        let first = YearMonth::new(MIN_YEAR, 0);
        assert_eq!(first.prev(), first);
        assert_eq!(YearMonth::new(i32::MIN, 0), first);
        let days = build_month_grid(MIN_YEAR, 0, &[]);
        assert_eq!(days.len(), GRID_CELLS);
        assert_eq!(days.iter().filter(|d| d.is_current_month()).count(), 31);
        for pair in days.windows(2) {
            assert_eq!(pair[0].date().succ_opt().unwrap(), pair[1].date());
        }

        assert_eq!(build_month_grid(i32::MAX, u32::MAX, &[]).len(), GRID_CELLS);

        // Past the range, dates are not folded back into it
        let beyond = Task::new(1, "beyond").with_due_date(date(MAX_YEAR + 1, 1, 5));
        let grid = MonthGrid::build(YearMonth::new(MAX_YEAR, 0), &[beyond]);
        assert!(grid.days().iter().all(|d| d.tasks().is_empty()));
    }

    #[test]
    fn weeks_are_rows_of_seven() {
        let grid = MonthGrid::build(YearMonth::new(2024, 2), &[]);
        let weeks: Vec<&[CalendarDay]> = grid.weeks().collect();
        assert_eq!(weeks.len(), 6);
        for week in weeks {
            assert_eq!(week.len(), 7);
            assert_eq!(week[0].date().weekday(), chrono::Weekday::Mon);
        }
        assert_eq!(grid.current_month_days().count(), 31);
    }
}
