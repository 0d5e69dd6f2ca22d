use crate::prelude::*;

/// Sink for the front end's diagnostic output.
pub trait Echo {
    fn echo(&mut self, line: &str);
}

#[derive(Default)]
pub struct LogEcho;

impl Echo for LogEcho {
    fn echo(&mut self, line: &str) {
        info!("{line}");
    }
}

impl Echo for Vec<String> {
    fn echo(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

#[test]
fn collect_lines() {
    let mut lines: Vec<String> = vec![];
    lines.echo("directory: data/");
    lines.echo("using max depth 5");
    assert_eq!(lines, vec!["directory: data/", "using max depth 5"]);
}
