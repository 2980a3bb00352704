use crate::errors::FetchServerError;
use url::Url;

/// Build the robots.txt URL for a given webpage URL, keeping the port.
pub fn get_robots_txt_url(url: &str) -> Result<String, FetchServerError> {
    let mut parsed = Url::parse(url).map_err(|_| FetchServerError::InvalidUrl {
        url: url.to_string(),
    })?;

    if parsed.host_str().is_none() {
        return Err(FetchServerError::InvalidUrl {
            url: url.to_string(),
        });
    }

    parsed.set_path("/robots.txt");
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok(parsed.to_string())
}

struct Rule {
    allow: bool,
    path: String,
}

struct Group {
    agents: Vec<String>,
    rules: Vec<Rule>,
}

/// A parsed robots.txt policy.
///
/// Supports `User-agent` groups with `Allow`/`Disallow` path rules, `*`
/// wildcards and `$` end anchors in paths, and comment stripping. The most
/// specific (longest) matching rule wins; `Allow` wins ties. Unknown fields
/// (Crawl-delay, Sitemap) are ignored.
pub struct RobotsTxt {
    groups: Vec<Group>,
}

impl RobotsTxt {
    pub fn parse(text: &str) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut current: Option<Group> = None;
        // consecutive User-agent lines share one group
        let mut last_was_agent = false;

        for line in text.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let field = field.trim().to_ascii_lowercase();
            let value = value.trim().to_string();

            match field.as_str() {
                "user-agent" => {
                    let agent = value.to_ascii_lowercase();
                    match current.as_mut() {
                        Some(group) if last_was_agent => group.agents.push(agent),
                        _ => {
                            if let Some(group) = current.take() {
                                groups.push(group);
                            }
                            current = Some(Group {
                                agents: vec![agent],
                                rules: Vec::new(),
                            });
                        }
                    }
                    last_was_agent = true;
                }
                "allow" | "disallow" => {
                    if let Some(group) = current.as_mut() {
                        group.rules.push(Rule {
                            allow: field == "allow",
                            path: value,
                        });
                    }
                    last_was_agent = false;
                }
                _ => {
                    last_was_agent = false;
                }
            }
        }
        if let Some(group) = current.take() {
            groups.push(group);
        }

        Self { groups }
    }

    /// Whether `user_agent` may fetch `path`. No matching group, or no
    /// matching rule in the group, means allowed.
    pub fn allows(&self, user_agent: &str, path: &str) -> bool {
        let Some(group) = self.group_for(user_agent) else {
            return true;
        };

        let mut best: Option<(usize, bool)> = None;
        for rule in &group.rules {
            // an empty Disallow value allows everything
            if rule.path.is_empty() {
                continue;
            }
            if !path_matches(&rule.path, path) {
                continue;
            }
            let specificity = rule.path.len();
            match best {
                Some((len, allow)) if len > specificity || (len == specificity && allow) => {}
                _ => best = Some((specificity, rule.allow)),
            }
        }
        best.map(|(_, allow)| allow).unwrap_or(true)
    }

    fn group_for(&self, user_agent: &str) -> Option<&Group> {
        let ua = user_agent.to_ascii_lowercase();
        self.groups
            .iter()
            .find(|g| g.agents.iter().any(|a| a != "*" && ua.contains(a.as_str())))
            .or_else(|| {
                self.groups
                    .iter()
                    .find(|g| g.agents.iter().any(|a| a == "*"))
            })
    }
}

/// Robots path pattern match: literal prefix with `*` wildcards and an
/// optional trailing `$` anchor.
fn path_matches(pattern: &str, path: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(stripped) => (stripped, true),
        None => (pattern, false),
    };

    let mut segments = pattern.split('*');
    let Some(first) = segments.next() else {
        return true;
    };
    if !path.starts_with(first) {
        return false;
    }
    let mut pos = first.len();

    let mut last_match_end = pos;
    for segment in segments {
        if segment.is_empty() {
            last_match_end = path.len();
            continue;
        }
        match path[pos..].find(segment) {
            Some(offset) => {
                pos += offset + segment.len();
                last_match_end = pos;
            }
            None => return false,
        }
    }

    !anchored || last_match_end == path.len()
}
