/// Delimiters considered when sniffing, in tie-break order.
const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Number of non-blank lines inspected.
const SAMPLE_LINES: usize = 10;

/// Guess the delimiter from a sample of the file.
///
/// Picks the candidate that appears (outside quotes) the same non-zero number
/// of times on the most sampled lines; ties go to the higher total count, then
/// to candidate order. Falls back to `,`.
pub fn sniff_delimiter(sample: &[u8]) -> u8 {
    let lines: Vec<&[u8]> = sample
        .split(|byte| *byte == b'\n')
        .filter(|line| line.iter().any(|byte| !byte.is_ascii_whitespace()))
        .take(SAMPLE_LINES)
        .collect();
    if lines.is_empty() {
        return b',';
    }
    let mut best = (b',', 0usize, 0usize);
    for candidate in CANDIDATES {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_unquoted(line, candidate))
            .collect();
        let header_count = counts[0];
        if header_count == 0 {
            continue;
        }
        let consistent = counts.iter().filter(|count| **count == header_count).count();
        let total: usize = counts.iter().sum();
        if (consistent, total) > (best.1, best.2) {
            best = (candidate, consistent, total);
        }
    }
    best.0
}

fn count_unquoted(line: &[u8], delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line {
        match *byte {
            b'"' => in_quotes = !in_quotes,
            b if b == delimiter && !in_quotes => count += 1,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_semicolon_exports() {
        let sample = b"DATA;FORNECEDOR;VALOR\n05/01/2025;\"ACME, LTDA\";1.234,56\n";
        assert_eq!(sniff_delimiter(sample), b';');
    }

    #[test]
    fn detects_comma_and_tab() {
        assert_eq!(sniff_delimiter(b"A,B,C\n1,2,3\n"), b',');
        assert_eq!(sniff_delimiter(b"A\tB\n1\t2\n"), b'\t');
    }

    #[test]
    fn ignores_delimiters_inside_quotes() {
        let sample = b"\"A,B\"|C\n\"1,2\"|3\n";
        assert_eq!(sniff_delimiter(sample), b'|');
    }

    #[test]
    fn defaults_to_comma() {
        assert_eq!(sniff_delimiter(b""), b',');
        assert_eq!(sniff_delimiter(b"SINGLE\nCOLUMN\n"), b',');
    }
}
