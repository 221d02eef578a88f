use crate::models::{ArgumentValue, Arguments};

/// Shape of a field slot inside a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One or more ASCII digits, coerced to an integer
    Integer,
    /// Exactly four ASCII digits, coerced to an integer
    Year,
    /// `YYYY-MM-DD`, kept as text
    Date,
    /// `HH:MM`, kept as text
    Time,
    /// One or more word characters (alphanumeric or `_`)
    ///
    /// `char::is_alphanumeric` also admits alphabetic combining marks such
    /// as Devanagari vowel signs, so `हिंदी` is a single word here.
    Word,
    /// One or more characters other than a newline
    Text,
}

impl FieldKind {
    /// Byte offsets where a capture of this kind may end, longest first
    fn candidate_ends(self, input: &str) -> Vec<usize> {
        match self {
            Self::Integer => greedy_ends(input, |c| c.is_ascii_digit()),
            Self::Word => greedy_ends(input, |c| c.is_alphanumeric() || c == '_'),
            Self::Text => greedy_ends(input, |c| c != '\n'),
            Self::Year => fixed_shape_end(input, "dddd").into_iter().collect(),
            Self::Date => fixed_shape_end(input, "dddd-dd-dd").into_iter().collect(),
            Self::Time => fixed_shape_end(input, "dd:dd").into_iter().collect(),
        }
    }

    /// Coerce a captured substring into its typed value
    fn coerce(self, raw: &str) -> Option<ArgumentValue> {
        match self {
            Self::Integer | Self::Year => ArgumentValue::from_digits(raw),
            Self::Date | Self::Time | Self::Word | Self::Text => {
                Some(ArgumentValue::Text(raw.to_string()))
            }
        }
    }
}

fn greedy_ends(input: &str, accept: impl Fn(char) -> bool) -> Vec<usize> {
    let mut ends: Vec<usize> = input
        .char_indices()
        .take_while(|(_, c)| accept(*c))
        .map(|(idx, c)| idx + c.len_utf8())
        .collect();
    ends.reverse();
    ends
}

/// `d` in `shape` stands for an ASCII digit; every other byte is literal
fn fixed_shape_end(input: &str, shape: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.len() < shape.len() {
        return None;
    }

    let conforms = shape.bytes().zip(bytes).all(|(expected, actual)| match expected {
        b'd' => actual.is_ascii_digit(),
        literal => literal == *actual,
    });

    conforms.then_some(shape.len())
}

/// Whether a template must consume the whole query or only a prefix of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Full,
    Prefix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { name: String, kind: FieldKind },
}

/// A fixed textual template made of literal text and typed field slots
///
/// Matching is case-sensitive and always starts at the beginning of the
/// query. Variable-width fields are greedy and give back characters until
/// the rest of the template lines up, so `in (.+)\.` captures up to the last
/// period that still lets the template match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment::Literal(text));
        }
        self
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.segments.push(Segment::Field {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match `query` against this template, returning typed fields in order
    pub fn match_query(&self, query: &str, anchor: Anchor) -> Option<Arguments> {
        let mut captured = Vec::with_capacity(self.segments.len());
        if !match_segments(&self.segments, query, anchor, &mut captured) {
            return None;
        }

        let mut arguments = Arguments::new();
        for (name, value) in captured {
            arguments.insert(name, value);
        }
        Some(arguments)
    }
}

fn match_segments<'t>(
    segments: &'t [Segment],
    input: &str,
    anchor: Anchor,
    captured: &mut Vec<(&'t str, ArgumentValue)>,
) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return anchor == Anchor::Prefix || input.is_empty();
    };

    match segment {
        Segment::Literal(text) => input
            .strip_prefix(text.as_str())
            .is_some_and(|tail| match_segments(rest, tail, anchor, captured)),
        Segment::Field { name, kind } => {
            for end in kind.candidate_ends(input) {
                let Some(value) = kind.coerce(&input[..end]) else {
                    continue;
                };

                captured.push((name.as_str(), value));
                if match_segments(rest, &input[end..], anchor, captured) {
                    return true;
                }
                captured.pop();
            }
            false
        }
    }
}
