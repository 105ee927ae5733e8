/// A single `Name: Value` pair taken from the header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The parsed header block of a request.
///
/// # Ordering
///
/// Iteration is **most-recent-first**: the last header line read off the
/// wire is yielded first. Callers must not assume wire order.
///
/// ```
/// # use spindle::http::header::Headers;
/// let mut headers = Headers::new();
/// headers.push("Host", "localhost:8888");
/// headers.push("Accept", "text/html");
///
/// let names: Vec<&str> = headers.iter().map(|h| h.name.as_str()).collect();
/// assert_eq!(names, ["Accept", "Host"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    // Stored in wire order; reversed on the way out.
    entries: Vec<HeaderEntry>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a header that was just read. It becomes the new head of
    /// the list.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(HeaderEntry::new(name, value));
    }

    /// Iterates most-recent-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HeaderEntry> + ExactSizeIterator {
        self.entries.iter().rev()
    }

    /// The most recently parsed header, if any.
    pub fn head(&self) -> Option<&HeaderEntry> {
        self.entries.last()
    }

    /// Looks up a header by name, ignoring ASCII case.
    ///
    /// When a name repeats, the most recently parsed value wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a HeaderEntry;
    type IntoIter = std::iter::Rev<std::slice::Iter<'a, HeaderEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().rev()
    }
}
