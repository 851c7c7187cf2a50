use super::{Flavor, Formatter, Params, ToSql};

/// A quoted identifier
pub(super) struct Ident<S>(pub(super) S);

/// A quoted string literal, used in constraints
pub(super) struct Literal<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let quote = match f.serializer.flavor {
            Flavor::Mysql => '`',
            Flavor::Postgresql | Flavor::Sqlite => '"',
        };

        quoted(f.dst, self.0.as_ref(), quote);
    }
}

impl<S: AsRef<str>> ToSql for Literal<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        quoted(f.dst, self.0.as_ref(), '\'');
    }
}

fn quoted(dst: &mut String, s: &str, quote: char) {
    dst.push(quote);
    for ch in s.chars() {
        // Quotes are escaped by doubling them
        if ch == quote {
            dst.push(quote);
        }
        dst.push(ch);
    }
    dst.push(quote);
}
