// Play counts, listening history, and the profile stats rollup.

#[derive(Debug, Deserialize)]
struct PlayCountRow {
    #[serde(default, deserialize_with = "crate::api::models::nullable")]
    play_count: u32,
}

/// Fold the profile row and listening history into the stats the profile
/// view renders. History is expected newest-first.
fn build_profile_stats(profile: ProfileRow, history: Vec<ListeningHistoryRow>) -> UserProfileStats {
    let mut by_subject: Vec<(String, u32, u32)> = Vec::new();
    for row in &history {
        let subject = row
            .audio
            .as_ref()
            .map(|a| a.subject.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Other".to_string());
        let completed = u32::from(row.completed);
        match by_subject.iter_mut().find(|(name, _, _)| *name == subject) {
            Some((_, done, total)) => {
                *done += completed;
                *total += 1;
            }
            None => by_subject.push((subject, completed, 1)),
        }
    }

    let subject_progress = by_subject
        .into_iter()
        .map(|(subject, completed, total)| SubjectProgress {
            subject,
            completed,
            total,
            progress: if total > 0 { completed * 100 / total } else { 0 },
        })
        .collect();

    let recent_activity = history
        .iter()
        .take(5)
        .map(|row| RecentActivity {
            id: row.id.clone(),
            audio_id: row.audio_id.clone(),
            kind: if row.completed {
                ActivityKind::Completed
            } else {
                ActivityKind::Started
            },
            title: row
                .audio
                .as_ref()
                .map(|a| a.title.clone())
                .unwrap_or_default(),
            subject: row
                .audio
                .as_ref()
                .map(|a| a.subject.clone())
                .unwrap_or_default(),
            position_seconds: row.current_position,
            duration_seconds: row
                .audio
                .as_ref()
                .map(|a| a.duration)
                .unwrap_or_default(),
            timestamp: row.last_played.clone().unwrap_or_default(),
        })
        .collect();

    UserProfileStats {
        total_listening_time: profile.total_listening_time,
        total_audios_completed: profile.total_audios_completed,
        listening_streak: profile.listening_streak,
        last_listening_date: profile.last_listening_date.unwrap_or_default(),
        subject_progress,
        recent_activity,
    }
}

impl SupabaseClient {
    /// Best-effort read-then-write bump. Concurrent listeners can lose an
    /// increment; counts are advisory, not billing data.
    pub async fn increment_play_count(&self, audio_id: &str) -> Result<u32, ApiError> {
        let encoded = encode_query_value(audio_id);
        let rows: Vec<PlayCountRow> = self
            .get_rows(
                "audios",
                &format!("select=play_count&id=eq.{encoded}&limit=1"),
            )
            .await?;
        let current = rows
            .first()
            .map(|row| row.play_count)
            .ok_or(ApiError::NotFound("audio"))?;
        let next = current.saturating_add(1);
        self.patch_rows(
            "audios",
            &format!("id=eq.{encoded}"),
            &json!({ "play_count": next }),
        )
        .await?;
        Ok(next)
    }

    /// At-least-once progress upsert keyed on (user, audio). A replayed write
    /// just overwrites the same row.
    pub async fn record_listening_progress(
        &self,
        user_id: &str,
        audio_id: &str,
        position_seconds: f64,
        completed: bool,
    ) -> Result<(), ApiError> {
        self.insert_row(
            "listening_history",
            "on_conflict=user_id,audio_id",
            &json!({
                "user_id": user_id,
                "audio_id": audio_id,
                "current_position": position_seconds,
                "completed": completed,
                "last_played": Utc::now().to_rfc3339(),
            }),
            "resolution=merge-duplicates,return=minimal",
        )
        .await
    }

    pub async fn get_profile_stats(&self, user_id: &str) -> Result<UserProfileStats, ApiError> {
        let encoded = encode_query_value(user_id);
        let profiles: Vec<ProfileRow> = self
            .get_rows(
                "profiles",
                &format!(
                    "select=total_listening_time,total_audios_completed,listening_streak,last_listening_date&id=eq.{encoded}&limit=1"
                ),
            )
            .await?;
        let profile = profiles.into_iter().next().unwrap_or_default();

        let history: Vec<ListeningHistoryRow> = self
            .get_rows(
                "listening_history",
                &format!(
                    "select=id,audio_id,completed,current_position,last_played,audios(title,subject,duration)&user_id=eq.{encoded}&order=last_played.desc&limit=50"
                ),
            )
            .await?;

        Ok(build_profile_stats(profile, history))
    }
}

#[cfg(test)]
mod engagement_tests {
    use super::*;

    fn history_row(id: &str, subject: &str, completed: bool) -> ListeningHistoryRow {
        ListeningHistoryRow {
            id: id.into(),
            completed,
            last_played: Some("2025-03-01T10:00:00Z".into()),
            audio: Some(HistoryAudioRef {
                title: format!("Lecture {id}"),
                subject: subject.into(),
                duration: 300,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn profile_stats_groups_history_by_subject() {
        let history = vec![
            history_row("h1", "Biology", true),
            history_row("h2", "Biology", false),
            history_row("h3", "Physics", true),
        ];
        let stats = build_profile_stats(ProfileRow::default(), history);

        assert_eq!(stats.subject_progress.len(), 2);
        let biology = &stats.subject_progress[0];
        assert_eq!(biology.subject, "Biology");
        assert_eq!(biology.completed, 1);
        assert_eq!(biology.total, 2);
        assert_eq!(biology.progress, 50);
        let physics = &stats.subject_progress[1];
        assert_eq!(physics.progress, 100);
    }

    #[test]
    fn profile_stats_caps_recent_activity_at_five() {
        let history: Vec<ListeningHistoryRow> = (0..8)
            .map(|i| history_row(&format!("h{i}"), "Biology", i % 2 == 0))
            .collect();
        let stats = build_profile_stats(ProfileRow::default(), history);
        assert_eq!(stats.recent_activity.len(), 5);
        assert_eq!(stats.recent_activity[0].kind, ActivityKind::Completed);
        assert_eq!(stats.recent_activity[1].kind, ActivityKind::Started);
    }

    #[test]
    fn profile_stats_uses_fallback_subject_for_orphan_rows() {
        let mut row = history_row("h1", "Biology", false);
        row.audio = None;
        let stats = build_profile_stats(ProfileRow::default(), vec![row]);
        assert_eq!(stats.subject_progress[0].subject, "Other");
    }
}
