/// Closed-vocabulary tag explaining why a rule contributed to a decision.
pub trait ReasonCode: Copy + Eq {
    fn code(&self) -> &'static str;
}

/// Alphabetical by wire code with duplicates removed. Downstream audit diffs rely on it.
pub fn sorted_reason_codes<C: ReasonCode>(codes: impl IntoIterator<Item = C>) -> Vec<C> {
    let mut codes: Vec<C> = codes.into_iter().collect();
    codes.sort_by_key(|code| code.code());
    codes.dedup();
    codes
}

pub fn join_explanations<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
