use crate::prelude::*;

use serde::de::Error as _;
use serde::ser::SerializeMap;

// Submission layout:
//   { "<puzzle id>": [ { "attempt_1": grid, "attempt_2": grid, ... }, ... ] }
// One object per test input of the puzzle, in test index order.

pub type Cell = u8;
pub type Grid = Vec<Vec<Cell>>;
pub type PuzzleId = String;
pub type TestIndex = usize;

pub const ATTEMPTS_PER_CASE: usize = 4;

const ATTEMPT_KEY_PREFIX: &str = "attempt_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub attempts: Vec<Grid>,
}

pub type Submission = BTreeMap<PuzzleId, Vec<Case>>;

fn attempt_key(index: usize) -> String {
    format!("{ATTEMPT_KEY_PREFIX}{index}")
}

pub fn parse_attempt_index(key: &str) -> Result<usize> {
    let suffix = key
        .strip_prefix(ATTEMPT_KEY_PREFIX)
        .context(format!("unexpected attempt key: {key}"))?;
    ensure!(
        !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()),
        "attempt key has non-numeric suffix: {key}"
    );
    Ok(suffix.parse()?)
}

impl Serialize for Case {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attempts.len()))?;
        for (i, grid) in self.attempts.iter().enumerate() {
            map.serialize_entry(&attempt_key(i + 1), grid)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Case {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Case, D::Error> {
        let raw = BTreeMap::<String, Grid>::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(D::Error::custom("case is empty"));
        }
        let mut indexed = raw
            .into_iter()
            .map(|(key, grid)| Ok((parse_attempt_index(&key)?, grid)))
            .collect::<Result<Vec<_>>>()
            .map_err(D::Error::custom)?;
        indexed.sort_by_key(|(index, _)| *index);
        for (expected, (index, _)) in (1..).zip(&indexed) {
            if *index != expected {
                return Err(D::Error::custom(
                    "attempt indices must be contiguous starting at 1",
                ));
            }
        }
        Ok(Case {
            attempts: indexed.into_iter().map(|(_, grid)| grid).collect(),
        })
    }
}

/// Parses `|012|340|` into rows of digits.
pub fn parse_attempt(text: &str) -> Result<Grid> {
    let text = text.trim();
    ensure!(!text.is_empty(), "attempt text is empty");
    ensure!(
        text.len() >= 2 && text.starts_with('|') && text.ends_with('|'),
        "attempt must start and end with '|': {text}"
    );

    let mut grid: Grid = vec![];
    for row in text.trim_matches('|').split('|') {
        ensure!(!row.is_empty(), "attempt contains empty row: {text}");
        ensure!(
            row.bytes().all(|b| b.is_ascii_digit()),
            "row contains non-digit characters: {row}"
        );
        let cells: Vec<Cell> = row.bytes().map(|b| b - b'0').collect();
        if let Some(first) = grid.first() {
            ensure!(
                first.len() == cells.len(),
                "inconsistent row width in attempt: {text}"
            );
        }
        grid.push(cells);
    }
    Ok(grid)
}

/// Splits `<puzzle>_<test index>`. A bare puzzle id means test index 0.
pub fn parse_output_id(output_id: &str) -> Result<(PuzzleId, TestIndex)> {
    ensure!(!output_id.is_empty(), "missing output_id");
    match output_id.rsplit_once('_') {
        Some((puzzle_id, suffix)) => {
            ensure!(!puzzle_id.is_empty(), "puzzle id is empty: {output_id}");
            ensure!(
                !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()),
                "non-numeric test index in output_id: {output_id}"
            );
            Ok((puzzle_id.to_string(), suffix.parse()?))
        }
        None => Ok((output_id.to_string(), 0)),
    }
}

#[derive(Deserialize, Debug)]
struct Row {
    output_id: String,
    output: String,
}

/// Builds a submission from the solver's `output_id,output` CSV.
pub fn from_csv(reader: impl std::io::Read) -> Result<Submission> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?;
    ensure!(
        headers.iter().eq(["output_id", "output"]),
        "unexpected CSV header: {:?}",
        headers
    );

    let mut puzzle_cases: BTreeMap<PuzzleId, BTreeMap<TestIndex, Vec<Grid>>> = BTreeMap::new();

    // Line 1 is the header.
    for (line, row) in (2..).zip(rdr.deserialize::<Row>()) {
        let row = row.context(format!("malformed CSV line {line}"))?;
        let output_id = row.output_id.trim();
        let (puzzle_id, test_index) = parse_output_id(output_id)?;

        let attempts = row
            .output
            .split_whitespace()
            .map(parse_attempt)
            .collect::<Result<Vec<_>>>()
            .context(format!("line {line}: {output_id}"))?;
        ensure!(!attempts.is_empty(), "missing attempts for {output_id}");

        let cases = puzzle_cases.entry(puzzle_id).or_default();
        if cases.insert(test_index, attempts).is_some() {
            bail!("duplicate test index {test_index} for {output_id}");
        }
    }

    let mut submission = Submission::new();
    for (puzzle_id, cases) in puzzle_cases {
        for (expected, index) in cases.keys().enumerate() {
            ensure!(
                *index == expected,
                "test indices for {puzzle_id} are not contiguous: expected {expected}, got {index}"
            );
        }
        let cases = cases
            .into_values()
            .map(|attempts| Case { attempts })
            .collect();
        submission.insert(puzzle_id, cases);
    }
    debug!("converted {} puzzles", submission.len());
    Ok(submission)
}

pub fn pad_attempts(submission: Submission) -> Result<Submission> {
    ensure!(!submission.is_empty(), "submission is empty");
    let mut padded = Submission::new();
    for (puzzle_id, mut cases) in submission {
        ensure!(!cases.is_empty(), "puzzle {puzzle_id} has no cases");
        for case in &mut cases {
            ensure!(
                case.attempts.len() <= ATTEMPTS_PER_CASE,
                "puzzle {puzzle_id} has a case with more than {ATTEMPTS_PER_CASE} attempts"
            );
            ensure!(
                case.attempts.iter().all(|grid| !grid.is_empty()),
                "puzzle {puzzle_id} has an empty attempt"
            );
            let first = case.attempts.first().context("case is empty")?.clone();
            case.attempts.resize(ATTEMPTS_PER_CASE, first);
        }
        padded.insert(puzzle_id, cases);
    }
    Ok(padded)
}

pub fn read_submission(path: impl AsRef<Path>) -> Result<Submission> {
    let path = path.as_ref();
    Ok(serde_json::from_str(&read_file(path)?).context(format!("invalid submission: {:?}", path))?)
}

pub fn write_submission(path: impl AsRef<Path>, submission: &Submission) -> Result<()> {
    write_file(path, &serde_json::to_string(submission)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attempt() -> Result<()> {
        assert_eq!(parse_attempt("|12|34|")?, vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(parse_attempt(" |7| ")?, vec![vec![7]]);
        assert!(parse_attempt("").is_err());
        assert!(parse_attempt("|").is_err());
        assert!(parse_attempt("12|34|").is_err());
        assert!(parse_attempt("|12||34|").is_err());
        assert!(parse_attempt("|1a|").is_err());
        assert!(parse_attempt("|12|3|").is_err());
        Ok(())
    }

    #[test]
    fn output_id() -> Result<()> {
        assert_eq!(parse_output_id("00576224_1")?, ("00576224".to_string(), 1));
        assert_eq!(parse_output_id("00576224")?, ("00576224".to_string(), 0));
        assert_eq!(parse_output_id("a_b_2")?, ("a_b".to_string(), 2));
        assert!(parse_output_id("").is_err());
        assert!(parse_output_id("_1").is_err());
        assert!(parse_output_id("abc_x").is_err());
        Ok(())
    }

    #[test]
    fn attempt_index() -> Result<()> {
        assert_eq!(parse_attempt_index("attempt_3")?, 3);
        assert!(parse_attempt_index("try_3").is_err());
        assert!(parse_attempt_index("attempt_").is_err());
        assert!(parse_attempt_index("attempt_x").is_err());
        Ok(())
    }

    #[test]
    fn convert() -> Result<()> {
        let csv = "output_id,output\n\
                   bbb_1,|1| |2|\n\
                   aaa,|12|34|\n\
                   bbb_0,|3|\n";
        let submission = from_csv(csv.as_bytes())?;
        assert_eq!(
            serde_json::to_value(&submission)?,
            json!({
                "aaa": [{"attempt_1": [[1, 2], [3, 4]]}],
                "bbb": [
                    {"attempt_1": [[3]]},
                    {"attempt_1": [[1]], "attempt_2": [[2]]}
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn convert_rejects_bad_input() {
        assert!(from_csv("id,output\naaa,|1|\n".as_bytes()).is_err());
        assert!(from_csv("output_id,output\naaa,\n".as_bytes()).is_err());
        assert!(from_csv("output_id,output\naaa_0,|1|\naaa_0,|2|\n".as_bytes()).is_err());
        assert!(from_csv("output_id,output\naaa_0,|1|\naaa_2,|2|\n".as_bytes()).is_err());
        assert!(from_csv("output_id,output\naaa_1,|1|\n".as_bytes()).is_err());
    }

    #[test]
    fn case_json() -> Result<()> {
        let case: Case = serde_json::from_value(json!({
            "attempt_2": [[2]],
            "attempt_1": [[1]],
        }))?;
        assert_eq!(case.attempts, vec![vec![vec![1]], vec![vec![2]]]);

        assert!(serde_json::from_value::<Case>(json!({})).is_err());
        assert!(serde_json::from_value::<Case>(json!({"attempt_2": [[1]]})).is_err());
        assert!(serde_json::from_value::<Case>(json!({"first": [[1]]})).is_err());
        Ok(())
    }

    #[test]
    fn pad() -> Result<()> {
        let submission: Submission = serde_json::from_value(json!({
            "aaa": [{"attempt_1": [[1]], "attempt_2": [[2]]}],
            "bbb": [{"attempt_1": [[5, 5]]}, {"attempt_1": [[1]], "attempt_2": [[2]], "attempt_3": [[3]], "attempt_4": [[4]]}],
        }))?;
        let padded = pad_attempts(submission)?;
        assert_eq!(
            serde_json::to_value(&padded)?,
            json!({
                "aaa": [{"attempt_1": [[1]], "attempt_2": [[2]], "attempt_3": [[1]], "attempt_4": [[1]]}],
                "bbb": [
                    {"attempt_1": [[5, 5]], "attempt_2": [[5, 5]], "attempt_3": [[5, 5]], "attempt_4": [[5, 5]]},
                    {"attempt_1": [[1]], "attempt_2": [[2]], "attempt_3": [[3]], "attempt_4": [[4]]}
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn pad_rejects_bad_input() -> Result<()> {
        assert!(pad_attempts(Submission::new()).is_err());

        let no_cases: Submission = serde_json::from_value(json!({"aaa": []}))?;
        assert!(pad_attempts(no_cases).is_err());

        let too_many: Submission = serde_json::from_value(json!({"aaa": [{
            "attempt_1": [[1]], "attempt_2": [[1]], "attempt_3": [[1]],
            "attempt_4": [[1]], "attempt_5": [[1]]
        }]}))?;
        assert!(pad_attempts(too_many).is_err());

        let empty_grid: Submission =
            serde_json::from_value(json!({"aaa": [{"attempt_1": []}]}))?;
        assert!(pad_attempts(empty_grid).is_err());
        Ok(())
    }

    #[test]
    fn files() -> Result<()> {
        let path = std::env::temp_dir().join(format!("arcrun-submission-{}.json", std::process::id()));
        let submission = from_csv("output_id,output\naaa,|9|\n".as_bytes())?;
        write_submission(&path, &submission)?;
        assert_eq!(read_submission(&path)?, submission);
        std::fs::remove_file(&path)?;
        Ok(())
    }
}
