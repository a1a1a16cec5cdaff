//! Percent-encoding for stop names, used in resource paths and the shareable URL fragment.
//!
//! `encode` escapes every byte except `A-Z a-z 0-9 - _ . ~`. Unlike JavaScript's
//! `encodeURIComponent`, that includes `!'()*`, which matches how the pipeline names its files.

use anyhow::Result;

pub fn encode(x: &str) -> String {
    urlencoding::encode(x).into_owned()
}

pub fn decode(x: &str) -> Result<String> {
    Ok(urlencoding::decode(x)?.into_owned())
}

/// The hosting page decodes the fragment once before we see it, so a single round of encoding
/// doesn't survive names containing `#` or `%`.
pub fn encode_fragment(stop_name: &str) -> String {
    encode(&encode(stop_name))
}

/// Inverse of `encode_fragment`. A leading `#` is ignored.
pub fn decode_fragment(fragment: &str) -> Result<String> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    decode(&decode(fragment)?)
}

/// Files are stored under the encoded stop name.
pub fn file_key(stop_name: &str) -> String {
    encode(stop_name)
}

/// The file key is encoded once more for URLs, since the server decodes the path.
pub fn url_key(stop_name: &str) -> String {
    encode(&file_key(stop_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_round_trip() {
        for name in [
            "Köln Hbf",
            "Essen Hbf",
            "Aachen, Bushof",
            "Bonn (Rhein) Beuel",
            "Mönchengladbach St. Peter's",
            "Halt! *Nord*",
            "Weg #3 / 50%",
            "Düsseldorf-Flughafen ~ Terminal",
            "",
        ] {
            assert_eq!(decode_fragment(&encode_fragment(name)).unwrap(), name);
            assert_eq!(
                decode_fragment(&format!("#{}", encode_fragment(name))).unwrap(),
                name
            );
        }
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode("(a)'!*"), "%28a%29%27%21%2A");
        assert_eq!(encode("Köln Hbf"), "K%C3%B6ln%20Hbf");
        assert_eq!(encode_fragment("Köln Hbf"), "K%25C3%25B6ln%2520Hbf");
        assert!(!encode_fragment("Weg #3").contains('#'));
    }

    #[test]
    fn keys() {
        assert_eq!(file_key("Bonn (Rhein)"), "Bonn%20%28Rhein%29");
        assert_eq!(url_key("Bonn (Rhein)"), "Bonn%2520%2528Rhein%2529");
    }
}
