// Read-oriented catalog browsing: topics with embedded stats, subject
// rollups, and individual lecture lookups.

const TOPIC_STATS_SELECT: &str = "id,name,subject_id,chapter_id,cover_image_url,description,subjects(name),chapters(name),audios(duration,play_count)";

/// Collapse an embedded topic row into client-side aggregates. The service
/// only hands back per-audio columns, so totals are summed here.
fn topic_stats(row: TopicRow) -> TopicWithStats {
    let audio_count = row.audios.len() as u32;
    let total_duration = row.audios.iter().map(|a| a.duration).sum();
    let total_plays = row.audios.iter().map(|a| a.play_count).sum();

    TopicWithStats {
        id: row.id,
        name: row.name,
        subject_id: row.subject_id,
        chapter_id: row.chapter_id,
        cover_image_url: row.cover_image_url,
        description: row.description,
        audio_count,
        total_duration,
        total_plays,
        subject_name: row.subjects.map(|s| s.name).unwrap_or_default(),
        chapter_name: row.chapters.map(|c| c.name).unwrap_or_default(),
    }
}

impl SupabaseClient {
    /// Topics ranked by total plays across their lectures.
    pub async fn get_trending_topics(&self, limit: usize) -> Result<Vec<TopicWithStats>, ApiError> {
        let rows: Vec<TopicRow> = self
            .get_rows("topics", &format!("select={TOPIC_STATS_SELECT}"))
            .await?;
        let mut topics: Vec<TopicWithStats> = rows.into_iter().map(topic_stats).collect();
        topics.sort_by(|a, b| b.total_plays.cmp(&a.total_plays));
        topics.truncate(limit);
        Ok(topics)
    }

    /// Topics that actually have lectures, newest first on the service side.
    pub async fn get_recommended_topics(
        &self,
        limit: usize,
    ) -> Result<Vec<TopicWithStats>, ApiError> {
        let rows: Vec<TopicRow> = self
            .get_rows(
                "topics",
                &format!("select={TOPIC_STATS_SELECT}&order=created_at.desc"),
            )
            .await?;
        let topics: Vec<TopicWithStats> = rows
            .into_iter()
            .map(topic_stats)
            .filter(|topic| topic.audio_count > 0)
            .take(limit)
            .collect();
        Ok(topics)
    }

    pub async fn get_subject_counts(&self) -> Result<Vec<(String, u32)>, ApiError> {
        let rows: Vec<SubjectCountRow> = self
            .get_rows("subjects", "select=name,audios(count)&order=name.asc")
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let count = row.audios.first().map(|c| c.count).unwrap_or_default();
                (row.name, count)
            })
            .collect())
    }

    pub async fn get_topic_audios(&self, topic_id: &str) -> Result<Vec<AudioTrack>, ApiError> {
        self.get_rows(
            "audios",
            &format!(
                "select=*&topic_id=eq.{}&order=created_at.asc",
                encode_query_value(topic_id)
            ),
        )
        .await
    }

    pub async fn get_audio(&self, audio_id: &str) -> Result<AudioTrack, ApiError> {
        let rows: Vec<AudioTrack> = self
            .get_rows(
                "audios",
                &format!("select=*&id=eq.{}&limit=1", encode_query_value(audio_id)),
            )
            .await?;
        rows.into_iter().next().ok_or(ApiError::NotFound("audio"))
    }
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    fn row_with_audios(stats: Vec<TopicAudioStat>) -> TopicRow {
        TopicRow {
            id: "t1".into(),
            name: "Photosynthesis".into(),
            subjects: Some(NameRef {
                name: "Biology".into(),
            }),
            audios: stats,
            ..Default::default()
        }
    }

    #[test]
    fn topic_stats_sums_embedded_audio_columns() {
        let row = row_with_audios(vec![
            TopicAudioStat {
                duration: 120,
                play_count: 3,
            },
            TopicAudioStat {
                duration: 300,
                play_count: 7,
            },
        ]);
        let stats = topic_stats(row);
        assert_eq!(stats.audio_count, 2);
        assert_eq!(stats.total_duration, 420);
        assert_eq!(stats.total_plays, 10);
        assert_eq!(stats.subject_name, "Biology");
        assert_eq!(stats.chapter_name, "");
    }

    #[test]
    fn topic_stats_handles_empty_topic() {
        let stats = topic_stats(row_with_audios(Vec::new()));
        assert_eq!(stats.audio_count, 0);
        assert_eq!(stats.total_duration, 0);
        assert_eq!(stats.total_plays, 0);
    }

    #[test]
    fn encode_query_value_escapes_reserved_characters() {
        assert_eq!(encode_query_value("abc-123"), "abc-123");
        assert_eq!(encode_query_value("a b&c"), "a%20b%26c");
    }
}
