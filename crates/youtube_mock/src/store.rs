use domain::{
    Channel, ChannelSnippet, ChannelStatistics, ContentDetails, Video, VideoSnippet,
    VideoStatistics,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::RwLock;

pub const SEED_VIDEO_ID: &str = "dQw4w9WgXcQ";
pub const SEED_CHANNEL_ID: &str = "UCuAXFkgsw1L7xaCfnd5JJOw";

/// Repository trait for the resources served by the mock
pub trait Repository: Send + Sync {
    /// Get a video by ID
    fn get_video(&self, id: &str) -> Option<Video>;

    /// Get a channel by ID
    fn get_channel(&self, id: &str) -> Option<Channel>;

    /// Add or replace a video
    fn add_video(&self, video: Video);

    /// Add or replace a channel
    fn add_channel(&self, channel: Channel);
}

/// In-memory implementation of the Repository trait
pub struct InMemoryRepository {
    videos: RwLock<HashMap<String, Video>>,
    channels: RwLock<HashMap<String, Channel>>,
}

impl InMemoryRepository {
    /// Create a repository holding one seeded video and its channel
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.populate_dummy_data();
        repo
    }

    pub fn empty() -> Self {
        Self {
            videos: RwLock::new(HashMap::new()),
            channels: RwLock::new(HashMap::new()),
        }
    }

    fn populate_dummy_data(&self) {
        let thumbnails = json!({
            "default": {
                "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg",
                "width": 120,
                "height": 90
            }
        });

        self.add_video(Video {
            id: Some(SEED_VIDEO_ID.to_string()),
            snippet: VideoSnippet {
                title: Some("Mock Music Video".to_string()),
                description: Some("This is a mock video for testing the YouTube Data API".to_string()),
                channel_id: Some(SEED_CHANNEL_ID.to_string()),
                channel_title: Some("Mock Channel".to_string()),
                published_at: Some("2009-10-25T06:57:33Z".to_string()),
                thumbnails: Some(thumbnails.clone()),
                tags: Some(vec!["mock".to_string(), "music".to_string()]),
                default_language: Some("en".to_string()),
                default_audio_language: Some("en".to_string()),
            },
            statistics: VideoStatistics {
                view_count: Some("1600000000".to_string()),
                like_count: Some("18000000".to_string()),
                comment_count: Some("2300000".to_string()),
            },
            content_details: ContentDetails {
                duration: Some("PT3M33S".to_string()),
                definition: Some("hd".to_string()),
            },
        });

        self.add_channel(Channel {
            id: SEED_CHANNEL_ID.to_string(),
            snippet: ChannelSnippet {
                title: Some("Mock Channel".to_string()),
                description: Some("Mock channel description".to_string()),
                thumbnails: Some(thumbnails),
            },
            statistics: ChannelStatistics {
                subscriber_count: Some("4000000".to_string()),
                video_count: Some("300".to_string()),
                view_count: Some("2500000000".to_string()),
            },
        });
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for InMemoryRepository {
    fn get_video(&self, id: &str) -> Option<Video> {
        self.videos
            .read()
            .expect("Failed to acquire read lock on videos")
            .get(id)
            .cloned()
    }

    fn get_channel(&self, id: &str) -> Option<Channel> {
        self.channels
            .read()
            .expect("Failed to acquire read lock on channels")
            .get(id)
            .cloned()
    }

    fn add_video(&self, video: Video) {
        self.videos
            .write()
            .expect("Failed to acquire write lock on videos")
            .insert(video.id.clone().unwrap_or_default(), video);
    }

    fn add_channel(&self, channel: Channel) {
        self.channels
            .write()
            .expect("Failed to acquire write lock on channels")
            .insert(channel.id.clone(), channel);
    }
}
