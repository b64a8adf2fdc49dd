use super::error::Diagnostic;

pub fn parse_credits(paragraphs: Vec<String>) -> Result<Vec<String>, Diagnostic> {
    if paragraphs.is_empty() {
        return Err(Diagnostic::EmptyCredits);
    }
    Ok(paragraphs)
}
