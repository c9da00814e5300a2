//! `Cookie` request header parsing (Netscape and RFC 2109 forms).

use smallvec::SmallVec;

/// A cookie sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// 0 for Netscape cookies
    pub version: u32,
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            version: 0,
            name: name.into(),
            value: value.into(),
            path: None,
            domain: None,
        }
    }
}

/// The cookies of a request, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    cookies: SmallVec<[Cookie; 4]>,
}

impl Cookies {
    /// Parse a `Cookie` header.
    ///
    /// `$Version` applies to the cookies after it; `$Path` and `$Domain`
    /// apply to the cookie before them. Pairs without `=` are skipped.
    ///
    /// ```
    /// use trellis_core::call::Cookies;
    ///
    /// let cookies = Cookies::parse(r#"$Version="1"; Customer="WILE_E_COYOTE"; $Path="/acme""#);
    /// let customer = cookies.get("Customer").unwrap();
    /// assert_eq!(customer.value, "WILE_E_COYOTE");
    /// assert_eq!(customer.version, 1);
    /// assert_eq!(customer.path.as_deref(), Some("/acme"));
    /// ```
    pub fn parse(header: &str) -> Self {
        let mut cookies: SmallVec<[Cookie; 4]> = SmallVec::new();
        let mut version = 0;

        for pair in header.split([';', ',']) {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            let value = unquote(value.trim());
            if name.is_empty() {
                continue;
            }

            if name.eq_ignore_ascii_case("$Version") {
                version = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("$Path") {
                if let Some(last) = cookies.last_mut() {
                    last.path = Some(value.to_string());
                }
            } else if name.eq_ignore_ascii_case("$Domain") {
                if let Some(last) = cookies.last_mut() {
                    last.domain = Some(value.to_string());
                }
            } else if !name.starts_with('$') {
                let mut cookie = Cookie::new(name, value);
                cookie.version = version;
                cookies.push(cookie);
            }
        }

        Self { cookies }
    }

    /// First cookie with this name.
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Cookie> + 'a {
        self.cookies.iter().filter(move |c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netscape_cookies() {
        let cookies = Cookies::parse("session=abc123; theme=dark");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("session").unwrap().value, "abc123");
        assert_eq!(cookies.get("theme").unwrap().version, 0);
    }

    #[test]
    fn test_rfc2109_cookies() {
        let cookies = Cookies::parse(
            r#"$Version="1"; Customer="WILE_E_COYOTE"; $Path="/acme"; Part_Number="Rocket_Launcher_0001"; $Path="/acme"; $Domain=".acme.com""#,
        );
        assert_eq!(cookies.len(), 2);
        let part = cookies.get("Part_Number").unwrap();
        assert_eq!(part.value, "Rocket_Launcher_0001");
        assert_eq!(part.version, 1);
        assert_eq!(part.domain.as_deref(), Some(".acme.com"));
        assert_eq!(cookies.get("Customer").unwrap().domain, None);
    }

    #[test]
    fn test_duplicates_and_garbage() {
        let cookies = Cookies::parse("a=1; junk; =2; a=3");
        assert_eq!(cookies.len(), 2);
        let values: Vec<_> = cookies.get_all("a").map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["1", "3"]);
        assert!(Cookies::parse("").is_empty());
    }
}
