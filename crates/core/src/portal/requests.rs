//! API request payloads.
//!
//! `Create*` requests validate and turn into a fresh entity; `Update*`
//! requests are partial and merge onto an existing one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::types::{Activity, Article, Event, UserProfile, UserRole};

const MAX_TITLE_LEN: usize = 200;

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong { max: MAX_TITLE_LEN });
    }
    Ok(())
}

fn validate_schedule(
    starts_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match ends_at {
        Some(end) if end < starts_at => Err(ValidationError::InvalidSchedule),
        _ => Ok(()),
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl CreateArticleRequest {
    pub fn into_article(self) -> Result<Article, ValidationError> {
        validate_title(&self.title)?;
        let mut article = Article::new(self.title, self.content);
        article.image_url = self.image_url;
        article.published = self.published;
        Ok(article)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl UpdateArticleRequest {
    pub fn apply_to(self, article: &mut Article) -> Result<(), ValidationError> {
        if let Some(title) = self.title {
            validate_title(&title)?;
            article.title = title;
        }
        if let Some(content) = self.content {
            article.content = content;
        }
        if let Some(image_url) = self.image_url {
            article.image_url = Some(image_url);
        }
        if let Some(published) = self.published {
            article.published = published;
        }
        article.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

impl CreateEventRequest {
    pub fn into_event(self) -> Result<Event, ValidationError> {
        validate_title(&self.title)?;
        validate_schedule(self.starts_at, self.ends_at)?;
        let mut event = Event::new(self.title, self.starts_at);
        event.description = self.description;
        event.location = self.location;
        event.ends_at = self.ends_at;
        Ok(event)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

impl UpdateEventRequest {
    pub fn apply_to(self, event: &mut Event) -> Result<(), ValidationError> {
        if let Some(ref title) = self.title {
            validate_title(title)?;
        }
        let starts_at = self.starts_at.unwrap_or(event.starts_at);
        let ends_at = self.ends_at.or(event.ends_at);
        validate_schedule(starts_at, ends_at)?;

        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(location) = self.location {
            event.location = Some(location);
        }
        event.starts_at = starts_at;
        event.ends_at = ends_at;
        event.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CreateActivityRequest {
    pub fn into_activity(self, event_id: &str) -> Result<Activity, ValidationError> {
        validate_title(&self.title)?;
        let mut activity = Activity::new(event_id, self.title);
        activity.description = self.description;
        activity.starts_at = self.starts_at;
        activity.location = self.location;
        Ok(activity)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl UpdateActivityRequest {
    pub fn apply_to(self, activity: &mut Activity) -> Result<(), ValidationError> {
        if let Some(title) = self.title {
            validate_title(&title)?;
            activity.title = title;
        }
        if let Some(description) = self.description {
            activity.description = description;
        }
        if let Some(starts_at) = self.starts_at {
            activity.starts_at = Some(starts_at);
        }
        if let Some(location) = self.location {
            activity.location = Some(location);
        }
        activity.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

impl CreateUserRequest {
    pub fn into_profile(self) -> Result<UserProfile, ValidationError> {
        if self.display_name.trim().is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        validate_email(&self.email)?;
        let mut profile = UserProfile::new(self.display_name, self.email);
        profile.role = self.role;
        Ok(profile)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_events: Option<Vec<String>>,
}

impl UpdateUserRequest {
    pub fn apply_to(self, profile: &mut UserProfile) -> Result<(), ValidationError> {
        if let Some(display_name) = self.display_name {
            if display_name.trim().is_empty() {
                return Err(ValidationError::EmptyDisplayName);
            }
            profile.display_name = display_name;
        }
        if let Some(email) = self.email {
            validate_email(&email)?;
            profile.email = email;
        }
        if let Some(favorite_events) = self.favorite_events {
            profile.favorite_events = favorite_events;
        }
        profile.updated_at = Utc::now();
        Ok(())
    }
}
