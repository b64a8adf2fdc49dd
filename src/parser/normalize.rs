use std::io::Read;

use unicode_normalization::UnicodeNormalization;

use super::error::Diagnostic;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read the whole stream and bring it into canonical form: no BOM, NFKC,
/// `\n` line endings only.
pub fn normalize<R: Read>(mut reader: R) -> Result<String, Diagnostic> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    let decoded = String::from_utf8(bytes)?;

    Ok(normalize_text(&decoded))
}

/// Text-level half of [`normalize`], for input that is already decoded.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    composed.replace("\r\n", "\n").replace('\r', "\n")
}

/// Cut text into paragraphs: maximal runs of non-blank lines, each line
/// trimmed, rejoined with `\n`.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        current.push(line);
    }

    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom() {
        let text = normalize(&b"\xEF\xBB\xBFMagic"[..]).unwrap();
        assert_eq!(text, "Magic");
    }

    #[test]
    fn unifies_line_endings() {
        let text = normalize(&b"a\r\nb\rc\n"[..]).unwrap();
        assert_eq!(text, "a\nb\nc\n");
    }

    #[test]
    fn applies_nfkc() {
        // U+FB01 LATIN SMALL LIGATURE FI, U+2126 OHM SIGN
        let text = normalize_text("\u{FB01}ve \u{2126}");
        assert_eq!(text, "five \u{03A9}");
    }

    #[test]
    fn idempotent() {
        let once = normalize_text("\u{FEFF}Caf\u{0065}\u{0301}\r\n\r\n\u{FB01}rst\rline");
        let twice = normalize_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_utf16() {
        // "Hi" as UTF-16LE with BOM
        let err = normalize(&b"\xFF\xFEH\x00i\x00"[..]).unwrap_err();
        assert!(matches!(err, Diagnostic::Decode(_)));
    }

    #[test]
    fn paragraphs_on_blank_lines() {
        let paragraphs = split_paragraphs("  one\ntwo  \n\n\n   \nthree\n");
        assert_eq!(paragraphs, vec!["one\ntwo", "three"]);
    }

    #[test]
    fn trailing_paragraph_kept() {
        let paragraphs = split_paragraphs("one\n\ntwo");
        assert_eq!(paragraphs, vec!["one", "two"]);
    }

    #[test]
    fn no_blank_paragraphs() {
        let text = "\n\n \t \na\n\n\t\nb\nc\n\n";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs.iter().all(|p| !p.trim().is_empty()));
    }

    #[test]
    fn empty_text_has_no_paragraphs() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n \n").is_empty());
    }
}
