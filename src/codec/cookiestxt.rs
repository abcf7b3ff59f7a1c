//! Mozilla cookies.txt codec.
//!
//! One cookie per line, seven tab-separated fields:
//!
//! ```text
//! domain <TAB> for-domain <TAB> path <TAB> secure <TAB> expires <TAB> name <TAB> value
//! ```
//!
//! Booleans are `TRUE`/`FALSE`, expiry is unix epoch seconds with `0`
//! standing for a session cookie. `#` starts a comment that runs to the end
//! of the line. The format is lossy: `accessed_at` is not stored and
//! `version` comes back as 0 (the Netscape baseline).

use time::OffsetDateTime;

use crate::codec::Codec;
use crate::cookie::Cookie;
use crate::errors::JarError;
use crate::jar::CookieIndex;

const FIELD_COUNT: usize = 7;

/// Line-oriented codec compatible with Mozilla's cookies.txt files.
pub struct CookiestxtCodec;

impl Codec for CookiestxtCodec {
    fn dump(&self, index: &CookieIndex) -> Result<String, JarError> {
        let mut out = String::new();
        for paths in index.values() {
            for names in paths.values() {
                for cookie in names.values() {
                    out.push_str(&format!(
                        "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                        cookie.domain,
                        flag(cookie.for_domain),
                        cookie.path,
                        flag(cookie.secure),
                        cookie.expires.map_or(0, |t| t.unix_timestamp()),
                        cookie.name,
                        cookie.value,
                    ));
                }
            }
        }
        Ok(out)
    }

    /// Parses cookies.txt text into an index.
    ///
    /// Lines that do not have exactly seven fields after comment stripping
    /// are skipped, as are lines whose expiry already lies in the past.
    /// Neither is an error.
    fn load(&self, input: &str) -> Result<CookieIndex, JarError> {
        let now = OffsetDateTime::now_utc();
        let mut index = CookieIndex::default();

        for line in input.lines() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != FIELD_COUNT {
                if !line.trim().is_empty() {
                    log::warn!("skipping malformed cookies.txt line: {:?}", line);
                }
                continue;
            }

            let expires = match fields[4].parse::<i64>().unwrap_or(0) {
                0 => None,
                secs => match OffsetDateTime::from_unix_timestamp(secs) {
                    Ok(t) => Some(t),
                    Err(_) => {
                        log::warn!("skipping cookie with out-of-range expiry: {:?}", line);
                        continue;
                    }
                },
            };
            if matches!(expires, Some(t) if t < now) {
                continue;
            }

            let mut cookie = Cookie::new(fields[5], fields[6]);
            cookie.domain = fields[0].to_string();
            cookie.for_domain = fields[1] == "TRUE";
            cookie.path = fields[2].to_string();
            cookie.secure = fields[3] == "TRUE";
            cookie.expires = expires;
            cookie.version = 0;

            index
                .entry(cookie.domain.to_lowercase())
                .or_default()
                .entry(cookie.path.clone())
                .or_default()
                .insert(cookie.name.clone(), cookie);
        }

        Ok(index)
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jar::CookieJar;
    use time::macros::datetime;

    fn cookie(domain: &str, name: &str, value: &str) -> Cookie {
        let mut c = Cookie::new(name, value);
        c.domain = domain.to_string();
        c
    }

    fn load(input: &str) -> CookieJar {
        CookieJar {
            index: CookiestxtCodec.load(input).unwrap(),
        }
    }

    #[test]
    fn dump_renders_seven_tab_separated_fields() {
        let mut c = cookie("example.com", "id", "abc");
        c.for_domain = true;
        c.path = "/account".to_string();
        c.secure = true;
        c.expires = Some(datetime!(2030-01-01 00:00:00 UTC));

        let mut jar = CookieJar::new();
        jar.add_unconditional(c);

        let dumped = CookiestxtCodec.dump(&jar.index).unwrap();
        assert_eq!(
            dumped,
            "example.com\tTRUE\t/account\tTRUE\t1893456000\tid\tabc\n"
        );
    }

    #[test]
    fn session_cookie_dumps_zero_expiry() {
        let mut jar = CookieJar::new();
        jar.add_unconditional(cookie("example.com", "id", "abc"));

        let dumped = CookiestxtCodec.dump(&jar.index).unwrap();
        assert_eq!(dumped, "example.com\tFALSE\t/\tFALSE\t0\tid\tabc\n");
    }

    #[test]
    fn round_trip_is_lossy_only_where_expected() {
        let mut original = cookie("example.com", "id", "abc");
        original.for_domain = true;
        original.path = "/account".to_string();
        original.secure = true;
        original.expires = Some(datetime!(2030-01-01 00:00:00 UTC));
        original.version = 2;
        original.accessed_at = datetime!(2020-05-05 05:05:05 UTC);

        let mut jar = CookieJar::new();
        jar.add_unconditional(original.clone());

        let dumped = CookiestxtCodec.dump(&jar.index).unwrap();
        let restored = load(&dumped);
        let got = &restored.index["example.com"]["/account"]["id"];

        assert_eq!(got.domain, original.domain);
        assert_eq!(got.for_domain, original.for_domain);
        assert_eq!(got.path, original.path);
        assert_eq!(got.secure, original.secure);
        assert_eq!(got.expires, original.expires);
        assert_eq!(got.name, original.name);
        assert_eq!(got.value, original.value);

        // Known lossy fields
        assert_eq!(got.version, 0);
        assert_ne!(got.accessed_at, original.accessed_at);
    }

    #[test]
    fn zero_expiry_decodes_as_session_cookie() {
        let jar = load("example.com\tFALSE\t/\tFALSE\t0\tid\tabc\n");
        assert!(jar.index["example.com"]["/"]["id"].is_session());
    }

    #[test]
    fn expired_line_is_dropped() {
        // Expiry far in the past (2001-09-09)
        let jar = load("example.com\tFALSE\t/\tFALSE\t1000000000\tid\tabc\n");
        assert!(jar.is_empty());
    }

    #[test]
    fn wrong_field_count_is_skipped() {
        let jar = load("example.com\tFALSE\t/\tFALSE\t0\n");
        assert!(jar.is_empty());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let input = "\
# Netscape HTTP Cookie File

example.com\tFALSE\t/\tFALSE\t0\tid\tabc\t# trailing junk becomes an extra field
other.net\tFALSE\t/\tFALSE\t0\tsid\txyz\n";
        let mut jar = load(input);

        // The third line has its comment stripped mid-field, leaving 8 fields
        let names: Vec<String> = jar.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, ["sid"]);
    }

    #[test]
    fn comment_after_fields_is_stripped() {
        let jar = load("example.com\tFALSE\t/\tFALSE\t0\tid\tabc#comment\n");
        assert_eq!(jar.index["example.com"]["/"]["id"].value, "abc");
    }

    #[test]
    fn domain_key_is_lower_cased() {
        let jar = load("Example.COM\tFALSE\t/\tFALSE\t0\tid\tabc\n");
        assert!(jar.index.contains_key("example.com"));
        // The cookie itself keeps the domain as written
        assert_eq!(jar.index["example.com"]["/"]["id"].domain, "Example.COM");
    }
}
