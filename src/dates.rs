use chrono::{Days, NaiveDate};

/// Inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days in the range; zero when `end` precedes `start`.
    pub fn len(&self) -> usize {
        let days = (self.end - self.start).num_days() + 1;
        days.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        std::iter::successors(Some(self.start), |day| day.checked_add_days(Days::new(1)))
            .take_while(move |day| *day <= end)
    }
}

/// Date as it appears in a result page path: `dd-mm-yyyy`.
pub fn page_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Date as shown in the outbound message header: `dd/mm/yyyy`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
