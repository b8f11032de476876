//! Person-name normalisation for form input.

/// Lowercases `input`, then uppercases the first character of every whitespace-delimited token.
///
/// Whitespace is kept as typed. Case mapping is Unicode's simple mapping, so accented Latin
/// letters behave as expected:
///
/// ```
/// assert_eq!(receita_core::names::proper_case("joão da silva"), "João Da Silva");
/// ```
pub fn proper_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_token_start = true;

    for c in input.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_token_start = true;
        } else if at_token_start {
            out.extend(c.to_uppercase());
            at_token_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalises_each_token() {
        assert_eq!(proper_case("joão da silva"), "João Da Silva");
        assert_eq!(proper_case("MARIA DAS DORES"), "Maria Das Dores");
        assert_eq!(proper_case("éLIDA   cOSTA"), "Élida   Costa");
    }

    #[test]
    fn keeps_whitespace_and_punctuation() {
        assert_eq!(proper_case("  ana\tpaula "), "  Ana\tPaula ");
        assert_eq!(proper_case("d'ávila"), "D'ávila");
        assert_eq!(proper_case(""), "");
    }

    #[test]
    fn is_stable_on_its_own_output() {
        let once = proper_case("josé CARLOS de souza");
        assert_eq!(proper_case(&once), once);
    }
}
