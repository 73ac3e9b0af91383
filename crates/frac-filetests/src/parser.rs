//! Test file parsing

/// A program extracted from a test file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Name from the `program <name>` line
    pub name: String,
    /// Program source, indentation preserved
    pub source: String,
    /// Filecheck directives (from `;` comments)
    pub expected_text: String,
    /// The test command type
    pub command: String,
}

/// Parse a test file and extract programs with their expected outputs.
///
/// A program runs from its `program <name>` line to the first `;` comment;
/// the comments that follow, up to the next `program` line, are its
/// expected output.
pub fn parse_test_file(content: &str) -> Vec<TestCase> {
    let lines: Vec<&str> = content.lines().collect();
    let mut test_cases = Vec::new();
    let mut i = 0;

    // Parse test command from header
    let mut command = String::new();
    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;
        if line.starts_with("test ") {
            command = String::from(line);
            break;
        }
    }

    while i < lines.len() {
        let Some(name) = lines[i].trim().strip_prefix("program ") else {
            i += 1;
            continue;
        };
        i += 1;

        let source_start = i;
        while i < lines.len() && !lines[i].trim_start().starts_with(';') {
            i += 1;
        }

        // Trailing blank lines separate the program from its expectations
        let mut source_end = i;
        while source_end > source_start && lines[source_end - 1].trim().is_empty() {
            source_end -= 1;
        }
        let source = lines[source_start..source_end].join("\n");

        let mut expected = Vec::new();
        while i < lines.len() && !lines[i].trim().starts_with("program ") {
            let trimmed = lines[i].trim();
            if let Some(comment) = trimmed.strip_prefix(';') {
                expected.push(comment.strip_prefix(' ').unwrap_or(comment));
            }
            i += 1;
        }

        test_cases.push(TestCase {
            name: String::from(name.trim()),
            source,
            expected_text: expected.join("\n"),
            command: command.clone(),
        });
    }

    test_cases
}
