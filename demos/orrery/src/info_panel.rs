/// Paginated free text for the selected body.
///
/// Blank lines are dropped; pages hold `page_size` lines and the cursor is
/// 1-indexed. Navigation saturates at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    lines: Vec<String>,
    page_size: usize,
    page: usize,
}

impl InfoPanel {
    /// A page size of zero is treated as one.
    pub fn new(text: &str, page_size: usize) -> Self {
        Self {
            lines: split_lines(text),
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn empty(page_size: usize) -> Self {
        Self::new("", page_size)
    }

    /// Replace the text and go back to the first page.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.page = 1;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `ceil(lines / page_size)`; zero for empty text.
    pub fn total_pages(&self) -> usize {
        self.lines.len().div_ceil(self.page_size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Move forward one page. Returns false at the last page.
    pub fn next(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Move back one page. Returns false at the first page.
    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Lines on a 1-indexed page.
    pub fn page_lines(&self, page: usize) -> Option<&[String]> {
        if page == 0 || page > self.total_pages() {
            return None;
        }
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.lines.len());
        Some(&self.lines[start..end])
    }

    pub fn current_lines(&self) -> &[String] {
        self.page_lines(self.page).unwrap_or(&[])
    }

    pub fn page_text(&self) -> String {
        self.current_lines().join("\n")
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
