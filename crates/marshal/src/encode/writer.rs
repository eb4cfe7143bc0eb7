use crate::encode::primitives;
use crate::options::Options;

/// Accumulates one JSON document, compact or indented.
pub struct JsonWriter {
    out: String,
    indent_cache: String,
    /// One entry per open object: whether it has emitted a member yet
    open: Vec<bool>,
    multiline: bool,
    indent: usize,
    escape_html: bool,
}

impl JsonWriter {
    pub fn new(opts: &Options) -> Self {
        Self {
            out: String::new(),
            indent_cache: String::new(),
            open: Vec::new(),
            multiline: opts.multiline,
            indent: opts.indent,
            escape_html: opts.escape_html,
        }
    }

    fn write_indent(&mut self, width: usize) {
        if width == 0 {
            return;
        }
        if self.indent_cache.len() < width {
            let missing = width - self.indent_cache.len();
            self.indent_cache.extend(core::iter::repeat_n(' ', missing));
        }
        self.out.push_str(&self.indent_cache[..width]);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.write_indent(self.open.len() * self.indent);
    }

    pub fn begin_object(&mut self) {
        self.out.push('{');
        self.open.push(false);
    }

    pub fn end_object(&mut self) {
        let had_members = self.open.pop().unwrap_or(false);
        if self.multiline && had_members {
            self.newline();
        }
        self.out.push('}');
    }

    /// Start a member: separator, layout and the quoted key.
    pub fn key(&mut self, key: &str) {
        if let Some(has_members) = self.open.last_mut() {
            if *has_members {
                self.out.push(',');
            }
            *has_members = true;
        }
        if self.multiline {
            self.newline();
        }
        primitives::escape_and_quote_into(&mut self.out, key, self.escape_html);
        self.out.push(':');
        if self.multiline {
            self.out.push(' ');
        }
    }

    /// Splice an already valid JSON token.
    pub fn raw(&mut self, token: &str) {
        self.out.push_str(token);
    }

    pub fn string(&mut self, s: &str) {
        primitives::escape_and_quote_into(&mut self.out, s, self.escape_html);
    }

    /// Numeric literal, quoted when `quoted` is set.
    pub fn number(&mut self, literal: &str, quoted: bool) {
        if quoted {
            self.out.push('"');
            self.out.push_str(literal);
            self.out.push('"');
        } else {
            self.out.push_str(literal);
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
