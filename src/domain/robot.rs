/// Closed range of robot numbers; both ends are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotRange {
    pub start: i64,
    pub end: i64,
}

impl RobotRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn numbers(&self) -> impl Iterator<Item = i64> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            usize::try_from(self.end.abs_diff(self.start))
                .map_or(usize::MAX, |n| n.saturating_add(1))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

pub fn robot_name(base: &str, number: i64) -> String {
    format!("{base}{number}")
}
