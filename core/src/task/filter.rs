//! Query filters over the task collection

use chrono::NaiveDate;

use super::model::{Task, TaskStatus};

/// Selects which tasks a listing returns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Every task
    #[default]
    All,
    /// Tasks whose title contains the substring (case-sensitive)
    TitleContains(String),
    /// Tasks dated on the given calendar day, whatever the time of day
    Date(NaiveDate),
    /// Tasks in exactly this status
    Status(TaskStatus),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::TitleContains(needle) => task.title.contains(needle.as_str()),
            Self::Date(day) => task.date.date() == *day,
            Self::Status(status) => task.status == *status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskPayload;

    fn task_on(title: &str, day: NaiveDate, hour: u32) -> Task {
        Task::from_payload(1, TaskPayload::new(title, day.and_hms_opt(hour, 15, 0).unwrap()))
    }

    #[test]
    fn test_title_filter_is_substring_match() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let task = task_on("Buy oat milk", day, 9);

        assert!(TaskFilter::TitleContains("oat".into()).matches(&task));
        assert!(TaskFilter::TitleContains(String::new()).matches(&task));
        assert!(!TaskFilter::TitleContains("Oat".into()).matches(&task));
        assert!(!TaskFilter::TitleContains("bread".into()).matches(&task));
    }

    #[test]
    fn test_date_filter_ignores_time_of_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let late = task_on("late", day, 23);

        assert!(TaskFilter::Date(day).matches(&late));
        assert!(!TaskFilter::Date(day.succ_opt().unwrap()).matches(&late));
    }

    #[test]
    fn test_status_filter_is_exact() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut task = task_on("status", day, 8);
        task.status = TaskStatus::Finalizado;

        assert!(TaskFilter::Status(TaskStatus::Finalizado).matches(&task));
        assert!(!TaskFilter::Status(TaskStatus::Pendente).matches(&task));
        assert!(TaskFilter::All.matches(&task));
    }
}
