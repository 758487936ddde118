/// The class label table shared with every classifier this crate feeds.
///
/// Output index `i` of a classifier corresponds to `CLASS_LABELS[i]`: digits,
/// then uppercase, then lowercase. Changing the order silently corrupts every
/// prediction, so it is a constant rather than configuration.
pub const CLASS_LABELS: [char; CLASS_COUNT] = build_labels();

pub const CLASS_COUNT: usize = 62;

const fn build_labels() -> [char; CLASS_COUNT] {
    let mut labels = ['\0'; CLASS_COUNT];
    let mut i = 0;
    while i < 10 {
        labels[i] = (b'0' + i as u8) as char;
        i += 1;
    }
    let mut j = 0;
    while j < 26 {
        labels[10 + j] = (b'A' + j as u8) as char;
        labels[36 + j] = (b'a' + j as u8) as char;
        j += 1;
    }
    labels
}

/// Returns the label for a classifier output index.
pub fn label_for(index: usize) -> Option<char> {
    CLASS_LABELS.get(index).copied()
}

/// Returns the classifier output index for a label.
pub fn index_of(label: char) -> Option<usize> {
    match label {
        '0'..='9' => Some(label as usize - '0' as usize),
        'A'..='Z' => Some(10 + label as usize - 'A' as usize),
        'a'..='z' => Some(36 + label as usize - 'a' as usize),
        _ => None,
    }
}

/// True when `labels` spells out exactly the table above, in order.
pub fn matches_table<S: AsRef<str>>(labels: &[S]) -> bool {
    labels.len() == CLASS_COUNT
        && labels.iter().zip(CLASS_LABELS.iter()).all(|(given, &expected)| {
            let mut chars = given.as_ref().chars();
            chars.next() == Some(expected) && chars.next().is_none()
        })
}
