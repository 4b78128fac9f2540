use std::fmt;
use std::fmt::Display;

pub(crate) struct State<'fmt, 'fmt2> {
    indent_level: usize,
    output: &'fmt mut fmt::Formatter<'fmt2>,
}

impl<'a, 'b> State<'a, 'b> {
    pub(crate) fn new(output: &'a mut fmt::Formatter<'b>) -> State<'a, 'b> {
        Self {
            indent_level: 0,
            output,
        }
    }

    pub(crate) fn write<T: Display>(&mut self, value: T) -> fmt::Result {
        write!(self.output, "{}", value)
    }

    pub(crate) fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.output.write_fmt(args)
    }

    pub(crate) fn new_line(&mut self) -> fmt::Result {
        self.write("\n")?;
        for _ in 0..self.indent_level {
            self.write("  ")?
        }
        Ok(())
    }

    pub(crate) fn indent_no_new_line(&mut self) {
        self.indent_level += 1;
    }

    pub(crate) fn dedent(&mut self) -> fmt::Result {
        self.indent_level -= 1;
        self.new_line()
    }

    /// Ends the current definition and leaves one empty line before the next one.
    pub(crate) fn end_definition(&mut self) -> fmt::Result {
        self.write("\n\n")
    }
}

pub(crate) fn write_indented_lines<T>(
    state: &mut State<'_, '_>,
    values: &[T],
    mut write_line: impl FnMut(&mut State<'_, '_>, &T) -> fmt::Result,
) -> fmt::Result {
    if !values.is_empty() {
        state.indent_no_new_line();
        for value in values {
            state.new_line()?;
            write_line(state, value)?;
        }
        state.dedent()?;
    }
    Ok(())
}

/// Writes a description on the line(s) preceding the described element.
///
/// Single-line text is written as a quoted string, anything spanning several lines as a block
/// string at the current indentation. An empty description writes nothing.
pub(crate) fn write_description(state: &mut State<'_, '_>, description: &str) -> fmt::Result {
    if description.is_empty() {
        return Ok(());
    }
    if !description.contains('\n') {
        state.write(GraphQLString(description))?;
        return state.new_line();
    }
    state.write(r#"""""#)?;
    for line in description.split('\n') {
        state.new_line()?;
        state.write(line.replace(r#"""""#, r#"\""""#))?;
    }
    state.new_line()?;
    state.write(r#"""""#)?;
    state.new_line()
}

pub(crate) struct DisplaySlice<'a, T>(pub(crate) &'a [T]);

impl<T: Display> Display for DisplaySlice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut iter = self.0.iter();
        if let Some(item) = iter.next() {
            write!(f, "{item}")?;
        }
        iter.try_for_each(|item| write!(f, ", {item}"))?;
        write!(f, "]")
    }
}

/// A GraphQL string literal: quoted, with the characters GraphQL requires escaped.
pub(crate) struct GraphQLString<'a>(pub(crate) &'a str);

impl Display for GraphQLString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.0.chars() {
            match c {
                '"' => write!(f, r#"\""#)?,
                '\\' => write!(f, r"\\")?,
                '\n' => write!(f, r"\n")?,
                '\r' => write!(f, r"\r")?,
                '\t' => write!(f, r"\t")?,
                '\u{8}' => write!(f, r"\b")?,
                '\u{c}' => write!(f, r"\f")?,
                c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")
    }
}
