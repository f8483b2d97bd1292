//! Story identifier extraction from the page URL
//!
//! Accepted forms:
//! - `/?story=<id>`
//! - `/story/<id>`
//!
//! The query parameter wins when both are present. An empty identifier is
//! treated as absent, which selects the newest story.

use crate::story::StoryId;
use url::Url;

const STORY_PARAM: &str = "story";
const STORY_PATH_PREFIX: &str = "/story/";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryRequest {
    pub story: Option<StoryId>,
}

impl StoryRequest {
    /// Request for the most recently created story
    pub fn latest() -> Self {
        Self::default()
    }

    pub fn for_story(id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self::from_identifier(Some(id.as_str()))
    }

    fn from_identifier(id: Option<&str>) -> Self {
        Self {
            story: id.filter(|id| !id.is_empty()).map(StoryId::from),
        }
    }

    /// Build a request from an already-split path and `story` parameter
    pub fn from_parts(path: &str, story_param: Option<&str>) -> Self {
        if let Some(param) = story_param {
            return Self::from_identifier(Some(param));
        }
        Self::from_identifier(story_from_path(path).as_deref())
    }

    /// Parse a full or root-relative page URL
    pub fn from_url(url: &str) -> Result<Self, url::ParseError> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse("http://localhost/")?.join(url)?
            }
            Err(e) => return Err(e),
        };

        let param = parsed
            .query_pairs()
            .find(|(key, _)| key == STORY_PARAM)
            .map(|(_, value)| value.into_owned());

        Ok(Self::from_parts(parsed.path(), param.as_deref()))
    }
}

/// Last segment of a `/story/...` path
fn story_from_path(path: &str) -> Option<String> {
    if !path.starts_with(STORY_PATH_PREFIX) {
        return None;
    }
    let segment = path.rsplit('/').next()?;
    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}
