use std::{fmt::Display, str::FromStr};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Page {
    #[default]
    Dashboard,
    Docker,
    Storage,
    Documents,
    Scripts,
    MediaRequests,
    Recommendations,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Docker,
        Page::Storage,
        Page::Documents,
        Page::Scripts,
        Page::MediaRequests,
        Page::Recommendations,
    ];

    pub fn index(&self) -> usize {
        Page::ALL
            .iter()
            .position(|page| page == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Page> {
        Page::ALL.get(index).copied()
    }

    pub fn next(&self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn previous(&self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Docker => "Docker",
            Page::Storage => "Storage",
            Page::Documents => "Documents",
            Page::Scripts => "Scripts",
            Page::MediaRequests => "Media",
            Page::Recommendations => "Recommendations",
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title().to_lowercase())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dashboard" => Ok(Page::Dashboard),
            "docker" => Ok(Page::Docker),
            "storage" => Ok(Page::Storage),
            "docs" | "documents" => Ok(Page::Documents),
            "scripts" => Ok(Page::Scripts),
            "media" | "media-requests" => Ok(Page::MediaRequests),
            "recommendations" => Ok(Page::Recommendations),
            _ => Err(format!("unknown page '{}'", s)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Page;

    #[test]
    fn next_and_previous_wrap_around() {
        assert_eq!(Page::Recommendations.next(), Page::Dashboard);
        assert_eq!(Page::Dashboard.previous(), Page::Recommendations);
        assert_eq!(Page::Docker.next(), Page::Storage);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("docs".parse::<Page>(), Ok(Page::Documents));
        assert_eq!("Media".parse::<Page>(), Ok(Page::MediaRequests));
        assert!("settings".parse::<Page>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for page in Page::ALL {
            assert_eq!(page.to_string().parse::<Page>(), Ok(page));
        }
    }
}
