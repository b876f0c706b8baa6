use serde::{Deserialize, Deserializer, Serialize};

/// Several catalog columns are nullable on the service side; map explicit
/// `null` (not just missing keys) onto the type's default.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One audio lecture. Immutable once handed to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AudioTrack {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subject: String,
    #[serde(default, deserialize_with = "nullable")]
    pub topic: String,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub is_premium: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub play_count: u32,
    #[serde(default)]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NameRef {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

/// Per-audio stat columns embedded in a topic select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TopicAudioStat {
    #[serde(default, deserialize_with = "nullable")]
    pub duration: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub play_count: u32,
}

/// Raw topic row with embedded subject/chapter names and audio stats.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct TopicRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub chapter_id: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subjects: Option<NameRef>,
    #[serde(default)]
    pub chapters: Option<NameRef>,
    #[serde(default)]
    pub audios: Vec<TopicAudioStat>,
}

/// Topic with aggregates computed client-side from the embedded select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TopicWithStats {
    pub id: String,
    pub name: String,
    pub subject_id: Option<String>,
    pub chapter_id: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub audio_count: u32,
    pub total_duration: u32,
    pub total_plays: u32,
    pub subject_name: String,
    pub chapter_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct CountRow {
    #[serde(default, deserialize_with = "nullable")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct SubjectCountRow {
    pub name: String,
    #[serde(default)]
    pub audios: Vec<CountRow>,
}

/// A saved-lecture join record with its embedded track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BookmarkedAudio {
    pub id: String,
    #[serde(default)]
    pub audio_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, rename = "audios")]
    pub audio: Option<AudioTrack>,
}

/// An offline-available join record with its embedded track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DownloadedAudio {
    pub id: String,
    #[serde(default)]
    pub audio_id: Option<String>,
    #[serde(default)]
    pub downloaded_at: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub file_size: u64,
    #[serde(default, rename = "audios")]
    pub audio: Option<AudioTrack>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct ProfileRow {
    #[serde(default, deserialize_with = "nullable")]
    pub total_listening_time: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub total_audios_completed: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub listening_streak: u32,
    #[serde(default)]
    pub last_listening_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct HistoryAudioRef {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subject: String,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct ListeningHistoryRow {
    pub id: String,
    #[serde(default)]
    pub audio_id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub completed: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub current_position: f64,
    #[serde(default)]
    pub last_played: Option<String>,
    #[serde(default, rename = "audios")]
    pub audio: Option<HistoryAudioRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SubjectProgress {
    pub subject: String,
    pub completed: u32,
    pub total: u32,
    pub progress: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivityKind {
    Completed,
    Started,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub id: String,
    pub audio_id: Option<String>,
    pub kind: ActivityKind,
    pub title: String,
    pub subject: String,
    pub position_seconds: f64,
    pub duration_seconds: u32,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserProfileStats {
    pub total_listening_time: u32,
    pub total_audios_completed: u32,
    pub listening_streak: u32,
    pub last_listening_date: String,
    pub subject_progress: Vec<SubjectProgress>,
    pub recent_activity: Vec<RecentActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// The nullable current-user identity supplied by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

pub fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let bytes = bytes as f64;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{} B", bytes as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_columns_fall_back_to_defaults() {
        let raw = r#"{
            "id": "a1",
            "title": "Cell Structure",
            "url": "https://cdn.example.com/a1.mp3",
            "subject": "Biology",
            "topic": "Cells",
            "duration": null,
            "is_premium": null,
            "play_count": null
        }"#;
        let track: AudioTrack = serde_json::from_str(raw).unwrap();
        assert_eq!(track.duration, 0);
        assert!(!track.is_premium);
        assert_eq!(track.play_count, 0);
    }

    #[test]
    fn embedded_track_uses_table_name_key() {
        let raw = r#"{
            "id": "b1",
            "audio_id": "a1",
            "created_at": "2025-03-01T10:00:00Z",
            "audios": { "id": "a1", "title": "Cell Structure", "url": "u", "duration": 120 }
        }"#;
        let bookmark: BookmarkedAudio = serde_json::from_str(raw).unwrap();
        assert_eq!(bookmark.audio.unwrap().duration, 120);
    }

    #[test]
    fn duration_and_size_formatting() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }
}
