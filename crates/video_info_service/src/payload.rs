use chrono::{DateTime, SecondsFormat, Utc};
use domain::{Channel, ChannelSnippet, ChannelStatistics, ContentDetails, Video};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Body of a successful response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    pub video: VideoRecord,
    /// `null` when the channel lookup failed or found nothing
    pub channel: Option<ChannelRecord>,
    #[serde(serialize_with = "iso_millis")]
    pub fetched_at: DateTime<Utc>,
}

impl ResponsePayload {
    pub fn new(video: Video, channel: Option<Channel>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            video: video.into(),
            channel: channel.map(Into::into),
            fetched_at,
        }
    }
}

// same shape as javascript's Date#toISOString, e.g. 2024-05-01T12:00:00.123Z
fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub snippet: VideoRecordSnippet,
    pub statistics: VideoCounts,
    pub content_details: ContentDetailsRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecordSnippet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Value>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_audio_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCounts {
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDetailsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

/// Channel statistics are passed through as-is, without defaulting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRecord {
    pub id: String,
    pub snippet: ChannelRecordSnippet,
    pub statistics: ChannelCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRecordSnippet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
}

fn count_or_zero(count: Option<String>) -> String {
    count
        .filter(|count| !count.is_empty())
        .unwrap_or_else(|| "0".to_string())
}

impl From<Video> for VideoRecord {
    fn from(video: Video) -> Self {
        let Video {
            id,
            snippet,
            statistics,
            content_details: ContentDetails {
                duration,
                definition,
            },
        } = video;

        Self {
            id,
            snippet: VideoRecordSnippet {
                title: snippet.title,
                description: snippet.description,
                channel_id: snippet.channel_id,
                channel_title: snippet.channel_title,
                published_at: snippet.published_at,
                thumbnails: snippet.thumbnails,
                tags: snippet.tags.unwrap_or_default(),
                default_language: snippet.default_language,
                default_audio_language: snippet.default_audio_language,
            },
            statistics: VideoCounts {
                view_count: count_or_zero(statistics.view_count),
                like_count: count_or_zero(statistics.like_count),
                comment_count: count_or_zero(statistics.comment_count),
            },
            content_details: ContentDetailsRecord {
                duration,
                definition,
            },
        }
    }
}

impl From<Channel> for ChannelRecord {
    fn from(channel: Channel) -> Self {
        let Channel {
            id,
            snippet: ChannelSnippet {
                title,
                description,
                thumbnails,
            },
            statistics:
                ChannelStatistics {
                    subscriber_count,
                    video_count,
                    view_count,
                },
        } = channel;

        Self {
            id,
            snippet: ChannelRecordSnippet {
                title,
                description,
                thumbnails,
            },
            statistics: ChannelCounts {
                subscriber_count,
                video_count,
                view_count,
            },
        }
    }
}
