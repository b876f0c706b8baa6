// Bookmark and download join records, each carrying its embedded track.
impl SupabaseClient {
    pub async fn get_user_bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkedAudio>, ApiError> {
        self.get_rows(
            "bookmarks",
            &format!(
                "select=id,audio_id,created_at,audios(*)&user_id=eq.{}&order=created_at.desc",
                encode_query_value(user_id)
            ),
        )
        .await
    }

    pub async fn add_bookmark(&self, user_id: &str, audio_id: &str) -> Result<(), ApiError> {
        self.insert_row(
            "bookmarks",
            "",
            &json!({ "user_id": user_id, "audio_id": audio_id }),
            "return=minimal",
        )
        .await
    }

    pub async fn remove_bookmark(&self, user_id: &str, audio_id: &str) -> Result<(), ApiError> {
        self.delete_rows(
            "bookmarks",
            &format!(
                "user_id=eq.{}&audio_id=eq.{}",
                encode_query_value(user_id),
                encode_query_value(audio_id)
            ),
        )
        .await
    }

    pub async fn get_user_downloads(&self, user_id: &str) -> Result<Vec<DownloadedAudio>, ApiError> {
        self.get_rows(
            "downloads",
            &format!(
                "select=id,audio_id,downloaded_at,file_size,audios(*)&user_id=eq.{}&order=downloaded_at.desc",
                encode_query_value(user_id)
            ),
        )
        .await
    }

    pub async fn add_download(
        &self,
        user_id: &str,
        audio_id: &str,
        file_size: u64,
    ) -> Result<(), ApiError> {
        self.insert_row(
            "downloads",
            "",
            &json!({
                "user_id": user_id,
                "audio_id": audio_id,
                "file_size": file_size,
            }),
            "return=minimal",
        )
        .await
    }

    pub async fn remove_download(&self, user_id: &str, audio_id: &str) -> Result<(), ApiError> {
        self.delete_rows(
            "downloads",
            &format!(
                "user_id=eq.{}&audio_id=eq.{}",
                encode_query_value(user_id),
                encode_query_value(audio_id)
            ),
        )
        .await
    }
}
