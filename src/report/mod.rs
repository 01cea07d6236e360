//! `--details` summary: counts over the grouping, printed in bold.

use crate::model::Group;
use owo_colors::OwoColorize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub groups: usize,
    pub singletons: usize,
    pub migration_groups: usize,
    /// Records that ended up in a migration group.
    pub migrated_records: usize,
}

impl Summary {
    pub fn from_groups(records: usize, groups: &[Group]) -> Self {
        let singletons = groups.iter().filter(|g| g.is_singleton()).count();
        let migrated_records = groups
            .iter()
            .filter(|g| !g.is_singleton())
            .map(|g| g.members.len())
            .sum();

        Self {
            records,
            groups: groups.len(),
            singletons,
            migration_groups: groups.len() - singletons,
            migrated_records,
        }
    }

    /// Plain-text report lines, one per statistic.
    pub fn lines(&self) -> Vec<String> {
        vec![
            "###### Basic Normalization Details ######".to_string(),
            format!("Total nodes parsed: {}", self.records),
            format!("Total unique groups: {}", self.groups),
            format!(
                "Total classifications unique to one node: {}",
                self.singletons
            ),
            format!(
                "Total migration groups: {} ({} nodes)",
                self.migration_groups, self.migrated_records
            ),
        ]
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line.bold())?;
        }
        Ok(())
    }

    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_to(&mut lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Attributes;
    use pretty_assertions::assert_eq;

    fn group(members: &[&str]) -> Group {
        Group {
            attributes: Attributes::new(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn counts_three_record_example() {
        let groups = vec![group(&["A", "B"]), group(&["C"])];
        let summary = Summary::from_groups(3, &groups);

        assert_eq!(
            summary,
            Summary {
                records: 3,
                groups: 2,
                singletons: 1,
                migration_groups: 1,
                migrated_records: 2,
            }
        );

        let lines = summary.lines();
        assert_eq!(lines[1], "Total nodes parsed: 3");
        assert_eq!(lines[2], "Total unique groups: 2");
        assert_eq!(lines[3], "Total classifications unique to one node: 1");
    }

    #[test]
    fn empty_grouping() {
        let summary = Summary::from_groups(0, &[]);
        assert_eq!(summary.groups, 0);
        assert_eq!(summary.singletons, 0);
        assert_eq!(summary.migrated_records, 0);
    }

    #[test]
    fn written_lines_are_bold() {
        let mut buf = Vec::new();
        Summary::from_groups(1, &[group(&["A"])])
            .write_to(&mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("\u{1b}[1mTotal nodes parsed: 1\u{1b}[0m"));
        assert_eq!(text.lines().count(), 5);
    }
}
