//! Human readable, indented output of decoded records.

/// Where [`Logger`] writes its lines.
#[derive(Debug, Clone)]
pub enum LogOutput {
    #[cfg(feature = "log")]
    Log(log::Level),
    #[cfg(feature = "log")]
    LogTarget(log::Level, String),
    StdOut,
    StdErr,
    #[cfg(feature = "log-to-file")]
    File(std::sync::Arc<parking_lot::Mutex<std::fs::File>>),
}

#[cfg(feature = "log")]
impl From<log::Level> for LogOutput {
    fn from(value: log::Level) -> Self {
        Self::Log(value)
    }
}

impl LogOutput {
    fn print(&self, msg: &str) {
        match self {
            #[cfg(feature = "log")]
            LogOutput::Log(level) => log::log!(*level, "{}", msg),
            #[cfg(feature = "log")]
            LogOutput::LogTarget(level, target) => {
                log::log!(target: target, *level, "{}", msg)
            }
            LogOutput::StdOut => println!("{}", msg),
            LogOutput::StdErr => eprintln!("{}", msg),
            #[cfg(feature = "log-to-file")]
            LogOutput::File(file) => {
                use std::io::Write;

                let mut file = file.lock();
                file.write_all(msg.as_bytes()).ok();
                file.write_all(b"\n").ok();
            }
        }
    }
}

/// One line of output: an indentation level, a title and an optional value.
#[derive(Debug, Clone, PartialEq)]
pub struct LogItem {
    level: usize,
    title: String,
    value: Option<String>,
}

impl LogItem {
    pub fn new<T: Into<String>, V: Into<String>>(level: usize, title: T, value: Option<V>) -> Self {
        Self {
            level,
            title: title.into(),
            value: value.map(Into::into),
        }
    }
}

impl<T: ToString, V: ToString> From<(usize, T, V)> for LogItem {
    fn from((level, title, value): (usize, T, V)) -> Self {
        Self::new(level, title.to_string(), Some(value.to_string()))
    }
}

impl<T: ToString> From<(usize, T)> for LogItem {
    fn from((level, value): (usize, T)) -> Self {
        Self::new::<_, String>(level, value.to_string(), None)
    }
}

pub struct Logger;

impl Logger {
    pub fn log<T>(output: &LogOutput, loggable: &T)
    where
        T: Loggable,
    {
        Self::log_impl(output, &loggable.as_log())
    }

    /// Render `loggable` to lines, the way [`Logger::log`] prints them.
    pub fn lines<T>(loggable: &T) -> Vec<String>
    where
        T: Loggable,
    {
        Self::format(&loggable.as_log())
    }

    fn log_impl(output: &LogOutput, items: &[LogItem]) {
        Self::format(items)
            .iter()
            .for_each(|line| output.print(line));
    }

    /// The first item is a heading. Values of consecutive items on the same
    /// level are aligned with each other.
    fn format(items: &[LogItem]) -> Vec<String> {
        let Some((heading, items)) = items.split_first() else {
            return Vec::new();
        };

        let mut lines = Vec::with_capacity(items.len() + 1);
        lines.push(heading.title.clone());

        let width = |item: &LogItem| item.title.chars().count();

        let mut start = 0;
        while start < items.len() {
            let level = items[start].level;
            let run = items[start..]
                .iter()
                .take_while(|item| item.level == level)
                .count();
            let group = &items[start..start + run];
            let right_align = group.iter().map(width).max().unwrap_or(0);

            for item in group {
                let front_padding = " ".repeat(item.level * 2);

                let line = match &item.value {
                    Some(value) => {
                        let value_padding = " ".repeat(right_align - width(item));
                        format!("{front_padding}{}: {value_padding}{value}", item.title)
                    }
                    None => format!("{front_padding}{}:", item.title),
                };

                lines.push(line);
            }

            start += run;
        }

        lines
    }
}

/// Types that can describe themselves as a list of [`LogItem`]s.
pub trait Loggable {
    fn as_log(&self) -> Vec<LogItem>;
}

#[macro_export]
macro_rules! log_vec {
    [$($msg:tt)*] => {
        $crate::to_log!(vec: $($msg)*)
    }
}

#[macro_export]
macro_rules! to_log {
    ([$($array:tt)*],) => {
        vec![$($array)*]
    };

    ([$($array:tt)*], ($level:literal, $title:expr, $value:expr $(,)?)) => {
        $crate::to_log!([$($array)* ($level, $title, $value).into(),],)
    };

    ([$($array:tt)*], ($level:literal, $title:expr $(,)?)) => {
        $crate::to_log!([$($array)* ($level, $title).into(),],)
    };

    ([$($array:tt)*], ($level:literal, $title:expr, $value:expr $(,)?), $($msg:tt)*) => {
        $crate::to_log!([$($array)* ($level, $title, $value).into(),], $($msg)*)
    };

    ([$($array:tt)*], ($level:literal, $title:expr $(,)?), $($msg:tt)*) => {
        $crate::to_log!([$($array)* ($level, $title).into(),], $($msg)*)
    };

    (vec: $($msg:tt)*) => {
        $crate::to_log!([], $($msg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair;

    impl Loggable for Pair {
        fn as_log(&self) -> Vec<LogItem> {
            log_vec![
                (0, "Pair"),
                (1, "Left", 1),
                (1, "Rightmost", "two"),
                (2, "Nested", "°C"),
                (2, "Heading"),
                (1, "Tail", 3),
            ]
        }
    }

    #[test]
    fn aligned_lines() {
        assert_eq!(
            Logger::lines(&Pair),
            vec![
                "Pair".to_string(),
                "  Left:      1".to_string(),
                "  Rightmost: two".to_string(),
                "    Nested:  °C".to_string(),
                "    Heading:".to_string(),
                "  Tail: 3".to_string(),
            ]
        );
    }
}
