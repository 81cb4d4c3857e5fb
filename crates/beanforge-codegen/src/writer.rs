//! Line-oriented source assembly.

/// Header prepended to every generated file.
pub const FILE_HEADER: &str = "\
//------------------------------------------------------------------------------
// <auto-generated>
//     This code was generated by a tool.
//     Changes to this file may cause incorrect behavior and will be lost if
//     the code is regenerated.
// </auto-generated>
//------------------------------------------------------------------------------
";

const INDENT: &str = "    ";

/// Collects indented lines of one file body.
#[derive(Debug, Default)]
pub struct CodeWriter {
    lines: Vec<String>,
    level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current indentation. Empty lines stay empty.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{text}", INDENT.repeat(self.level)));
        }
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Write a `/** ... */` doc block if `comment` is present and non-blank.
    pub fn doc_block(&mut self, comment: Option<&str>) {
        let Some(comment) = comment.filter(|c| !c.trim().is_empty()) else {
            return;
        };
        self.line("/**");
        for line in comment.lines() {
            self.line(format!(" * {}", line.trim_end()));
        }
        self.line(" */");
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The finished file: `header`, then every line, newline terminated.
    pub fn into_result(self, header: &str) -> String {
        let mut out = String::with_capacity(header.len() + self.lines.len() * 32);
        out.push_str(header);
        for line in self.lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
