use crate::evaluator;

/// Batch mode: evaluate every non-empty line of a file independently.
/// A failing line is reported and the remaining lines still run, so one
/// bad expression does not mask the rest of the batch. Returns whether
/// every line evaluated successfully.

pub fn run(source: &str, filename: Option<&str>) -> bool {
    let mut all_ok = true;

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match evaluator::evaluate(line) {
            Ok(value) => println!("{} = {}", line, value),
            Err(error) => {
                error.report(line, filename);
                all_ok = false;
            }
        }
    }

    all_ok
}
