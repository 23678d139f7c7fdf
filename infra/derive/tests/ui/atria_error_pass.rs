use atria_derive::atria_error;
use std::borrow::Cow;

#[atria_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64, DemoError> {
    raw.parse::<i64>().context("Parsing a bound")
}

fn main() {
    let _ = parse("4");
}
