//! Failure message construction.
//!
//! Every failing check builds its final text through an
//! [`ErrorMessageFactory`]: a template with `%s` placeholders plus arguments
//! rendered through the caller's [`Representation`] at construction time.
//! Factories are created fresh per failure, immutable once built, and never
//! reused. The canned constructors below (one per failure kind) keep the
//! template family in a single place.
//!
//! Messages are always multi-line, with the actual/expected/diagnostic
//! values each on their own indented line:
//!
//! ```text
//! Expecting
//!   <[6, 8, 10]>
//! to contain
//!   <[6, 8, 20]>
//! but could not find
//!   <[20]>
//! ```

use std::time::Duration;

use crate::representation::{to_text, Represent, Representation};

/// Builds one failure message from a template and pre-rendered arguments.
pub struct ErrorMessageFactory {
    template: String,
    args: Vec<String>,
}

impl ErrorMessageFactory {
    /// Start a factory from a template. `%s` placeholders are substituted
    /// in order by the arguments added below.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument, rendering it through `repr` now. The factory holds
    /// text only, so later mutation of the value cannot change the message.
    pub fn rendered(mut self, value: &dyn Represent, repr: &dyn Representation) -> Self {
        self.args.push(to_text(repr, value));
        self
    }

    /// Add an argument that is already display text.
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.args.push(text.into());
        self
    }

    /// Append the "when comparing values using ..." suffix for a named
    /// comparison strategy; no-op for the standard strategy.
    pub fn comparing_with(mut self, strategy_description: Option<&str>) -> Self {
        if let Some(description) = strategy_description {
            self.template
                .push_str(&format!("\nwhen comparing values using {}", description));
        }
        self
    }

    /// Produce the final message text.
    pub fn create(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        let mut args = self.args.iter();
        while let Some(position) = rest.find("%s") {
            out.push_str(&rest[..position]);
            match args.next() {
                Some(arg) => out.push_str(arg),
                None => out.push_str("%s"),
            }
            rest = &rest[position + 2..];
        }
        out.push_str(rest);
        out
    }
}

/// The dedicated failure for a missing actual value, distinct from every
/// content mismatch.
pub fn actual_is_null() -> String {
    "\nExpecting actual not to be null".to_string()
}

pub fn should_contain(
    actual: &dyn Represent,
    expected: &dyn Represent,
    missing: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto contain\n  <%s>\nbut could not find\n  <%s>")
        .rendered(actual, repr)
        .rendered(expected, repr)
        .rendered(missing, repr)
        .comparing_with(strategy)
}

pub fn should_contain_only(
    actual: &dyn Represent,
    expected: &dyn Represent,
    missing: &dyn Represent,
    unexpected: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting\n  <%s>\nto contain only\n  <%s>\nelements not found\n  <%s>\nand elements not expected\n  <%s>",
    )
    .rendered(actual, repr)
    .rendered(expected, repr)
    .rendered(missing, repr)
    .rendered(unexpected, repr)
    .comparing_with(strategy)
}

pub fn should_contain_exactly(
    actual: &dyn Represent,
    expected: &dyn Represent,
    missing: &dyn Represent,
    unexpected: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting\n  <%s>\nto contain exactly (and in same order)\n  <%s>\nbut some elements were not found\n  <%s>\nand others were not expected\n  <%s>",
    )
    .rendered(actual, repr)
    .rendered(expected, repr)
    .rendered(missing, repr)
    .rendered(unexpected, repr)
    .comparing_with(strategy)
}

pub fn elements_differ_at_index(
    actual_element: &dyn Represent,
    expected_element: &dyn Represent,
    index: usize,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nActual and expected have the same elements but not in the same order, at index %s actual element was\n  <%s>\nwhereas expected element was\n  <%s>",
    )
    .literal(index.to_string())
    .rendered(actual_element, repr)
    .rendered(expected_element, repr)
    .comparing_with(strategy)
}

pub fn should_contain_exactly_in_any_order(
    actual: &dyn Represent,
    expected: &dyn Represent,
    missing: &dyn Represent,
    unexpected: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting\n  <%s>\nto contain exactly in any order\n  <%s>\nelements not found\n  <%s>\nand elements not expected\n  <%s>",
    )
    .rendered(actual, repr)
    .rendered(expected, repr)
    .rendered(missing, repr)
    .rendered(unexpected, repr)
    .comparing_with(strategy)
}

pub fn should_contain_only_once(
    actual: &dyn Represent,
    expected: &dyn Represent,
    not_found: &dyn Represent,
    not_only_once: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting\n  <%s>\nto contain only once\n  <%s>\nbut some elements were not found\n  <%s>\nand others were found more than once\n  <%s>",
    )
    .rendered(actual, repr)
    .rendered(expected, repr)
    .rendered(not_found, repr)
    .rendered(not_only_once, repr)
    .comparing_with(strategy)
}

pub fn should_contain_sequence(
    actual: &dyn Represent,
    sequence: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto contain sequence\n  <%s>")
        .rendered(actual, repr)
        .rendered(sequence, repr)
        .comparing_with(strategy)
}

pub fn should_contain_subsequence(
    actual: &dyn Represent,
    subsequence: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto contain subsequence\n  <%s>")
        .rendered(actual, repr)
        .rendered(subsequence, repr)
        .comparing_with(strategy)
}

pub fn should_start_with(
    actual: &dyn Represent,
    sequence: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto start with\n  <%s>")
        .rendered(actual, repr)
        .rendered(sequence, repr)
        .comparing_with(strategy)
}

pub fn should_end_with(
    actual: &dyn Represent,
    sequence: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto end with\n  <%s>")
        .rendered(actual, repr)
        .rendered(sequence, repr)
        .comparing_with(strategy)
}

pub fn should_not_contain(
    actual: &dyn Represent,
    values: &dyn Represent,
    found: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nnot to contain\n  <%s>\nbut found\n  <%s>")
        .rendered(actual, repr)
        .rendered(values, repr)
        .rendered(found, repr)
        .comparing_with(strategy)
}

pub fn should_contain_any_of(
    actual: &dyn Represent,
    values: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto contain any of\n  <%s>\nbut none were found")
        .rendered(actual, repr)
        .rendered(values, repr)
        .comparing_with(strategy)
}

pub fn should_not_have_duplicates(
    actual: &dyn Represent,
    duplicate_groups: String,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nnot to have duplicates but found\n  <%s>")
        .rendered(actual, repr)
        .literal(duplicate_groups)
        .comparing_with(strategy)
}

pub fn should_be_sorted(
    out_of_order_index: usize,
    actual: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting\n  <%s>\nto be sorted but found element at index %s greater than the next one",
    )
    .rendered(actual, repr)
    .literal(out_of_order_index.to_string())
}

pub fn should_be_sorted_according_to_comparator(
    out_of_order_index: usize,
    actual: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting\n  <%s>\nto be sorted according to the given comparator but found element at index %s greater than the next one",
    )
    .rendered(actual, repr)
    .literal(out_of_order_index.to_string())
    .comparing_with(strategy)
}

pub fn should_have_size(
    actual: &dyn Represent,
    actual_size: usize,
    expected_size: usize,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto have size\n  <%s>\nbut had size\n  <%s>")
        .rendered(actual, repr)
        .literal(expected_size.to_string())
        .literal(actual_size.to_string())
}

pub fn should_have_size_comparison(
    actual: &dyn Represent,
    actual_size: usize,
    relation: &str,
    boundary: usize,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting size of\n  <%s>\nto be %s <%s> but was <%s>")
        .rendered(actual, repr)
        .literal(relation.to_string())
        .literal(boundary.to_string())
        .literal(actual_size.to_string())
}

pub fn should_have_size_between(
    actual: &dyn Represent,
    actual_size: usize,
    lower: usize,
    higher: usize,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting size of\n  <%s>\nto be between <%s> and <%s> but was <%s>")
        .rendered(actual, repr)
        .literal(lower.to_string())
        .literal(higher.to_string())
        .literal(actual_size.to_string())
}

pub fn should_have_same_size_as(
    actual: &dyn Represent,
    actual_size: usize,
    other_size: usize,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting\n  <%s>\nto have the same size as\n  <%s>\nbut had size\n  <%s>",
    )
    .rendered(actual, repr)
    .literal(other_size.to_string())
    .literal(actual_size.to_string())
}

pub fn should_be_empty(actual: &dyn Represent, repr: &dyn Representation) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting empty but was\n  <%s>").rendered(actual, repr)
}

pub fn should_not_be_empty() -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting actual not to be empty")
}

pub fn should_be_null_or_empty(
    actual: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting null or empty but was\n  <%s>").rendered(actual, repr)
}

pub fn should_contain_at_index(
    actual: &dyn Represent,
    value: &dyn Represent,
    index: usize,
    found: &dyn Represent,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting\n  <%s>\nto contain\n  <%s>\nat index <%s> but found\n  <%s>",
    )
    .rendered(actual, repr)
    .rendered(value, repr)
    .literal(index.to_string())
    .rendered(found, repr)
    .comparing_with(strategy)
}

pub fn should_not_contain_at_index(
    actual: &dyn Represent,
    value: &dyn Represent,
    index: usize,
    strategy: Option<&str>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nnot to contain\n  <%s>\nat index <%s>")
        .rendered(actual, repr)
        .rendered(value, repr)
        .literal(index.to_string())
        .comparing_with(strategy)
}

pub fn should_contain_keys(
    actual: &dyn Represent,
    missing: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto contain keys\n  <%s>")
        .rendered(actual, repr)
        .rendered(missing, repr)
}

pub fn should_contain_values(
    actual: &dyn Represent,
    missing: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto contain values\n  <%s>")
        .rendered(actual, repr)
        .rendered(missing, repr)
}

pub fn should_contain_entries(
    actual: &dyn Represent,
    missing: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto contain entries\n  <%s>")
        .rendered(actual, repr)
        .rendered(missing, repr)
}

pub fn should_have_same_textual_content(
    actual: &dyn Represent,
    expected: &dyn Represent,
    diffs: &[String],
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    let mut template =
        String::from("\nExpecting the content of\n  <%s>\nto be equal to the content of\n  <%s>\nbut they differ:");
    for _ in diffs {
        template.push_str("\n  %s");
    }
    let mut factory = ErrorMessageFactory::new(template)
        .rendered(actual, repr)
        .rendered(expected, repr);
    for diff in diffs {
        factory = factory.literal(diff.clone());
    }
    factory
}

pub fn should_have_same_binary_content(
    actual: &dyn Represent,
    expected: &dyn Represent,
    offset: u64,
    actual_byte: Option<u8>,
    expected_byte: Option<u8>,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new(
        "\nExpecting the binary content of\n  <%s>\nto be equal to the binary content of\n  <%s>\nbut they differ at offset <%s>: expected <%s> but was <%s>",
    )
    .rendered(actual, repr)
    .rendered(expected, repr)
    .literal(offset.to_string())
    .literal(byte_text(expected_byte))
    .literal(byte_text(actual_byte))
}

fn byte_text(byte: Option<u8>) -> String {
    match byte {
        Some(b) => format!("0x{:02X}", b),
        None => "end of content".to_string(),
    }
}

pub fn should_have_digest(
    actual: &dyn Represent,
    expected_hex: &str,
    actual_hex: &str,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto have digest\n  <%s>\nbut had\n  <%s>")
        .rendered(actual, repr)
        .literal(expected_hex.to_string())
        .literal(actual_hex.to_string())
}

pub fn should_exist(path: &dyn Represent, repr: &dyn Representation) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting file\n  <%s>\nto exist").rendered(path, repr)
}

pub fn should_be_regular_file(
    path: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto be a regular file").rendered(path, repr)
}

pub fn should_be_readable(path: &dyn Represent, repr: &dyn Representation) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto be readable").rendered(path, repr)
}

pub fn should_be_completed_within(timeout: Duration) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <pending future>\nto be completed within %s")
        .literal(format!("{:?}", timeout))
}

pub fn should_still_be_pending_after(timeout: Duration) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting future not to complete within %s but it did")
        .literal(format!("{:?}", timeout))
}

pub fn should_match_pattern(
    actual: &dyn Represent,
    pattern: &str,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto match pattern\n  <%s>")
        .rendered(actual, repr)
        .literal(pattern.to_string())
}

pub fn should_not_match_pattern(
    actual: &dyn Represent,
    pattern: &str,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nnot to match pattern\n  <%s>")
        .rendered(actual, repr)
        .literal(pattern.to_string())
}

pub fn should_contain_text(
    actual: &dyn Represent,
    expected: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto contain\n  <%s>")
        .rendered(actual, repr)
        .rendered(expected, repr)
}

pub fn should_not_contain_text(
    actual: &dyn Represent,
    expected: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nnot to contain\n  <%s>")
        .rendered(actual, repr)
        .rendered(expected, repr)
}

pub fn file_should_have_content(
    path: &dyn Represent,
    diffs: &[String],
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    let mut template = String::from("\nExpecting file\n  <%s>\nto have the expected content but it did not:");
    for _ in diffs {
        template.push_str("\n  %s");
    }
    let mut factory = ErrorMessageFactory::new(template).rendered(path, repr);
    for diff in diffs {
        factory = factory.literal(diff.clone());
    }
    factory
}

pub fn should_be_equal(
    actual: &dyn Represent,
    expected: &dyn Represent,
    repr: &dyn Representation,
) -> ErrorMessageFactory {
    ErrorMessageFactory::new("\nExpecting\n  <%s>\nto be equal to\n  <%s>\nbut was not")
        .rendered(actual, repr)
        .rendered(expected, repr)
}
