/// How a single HTTP round trip ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The server answered and the body was usable.
    Responded,
    /// The server answered but the body could not be parsed.
    InvalidResponse,
    /// No response: refused, reset, or timed out.
    ConnectionFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePageResult {
    /// HTTP status, 0 when the server could not be reached.
    pub status: u16,
    pub has_images: bool,
    pub has_like_button: bool,
    pub has_share_button: bool,
    pub has_rezide_content: bool,
    pub outcome: CheckOutcome,
}

impl HomePageResult {
    pub fn unreachable() -> Self {
        Self {
            status: 0,
            has_images: false,
            has_like_button: false,
            has_share_button: false,
            has_rezide_content: false,
            outcome: CheckOutcome::ConnectionFailed,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
            && self.has_images
            && self.has_like_button
            && self.has_share_button
            && self.has_rezide_content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikesResult {
    /// Label used in output, e.g. `POST /api/likes`.
    pub endpoint: String,
    pub status: u16,
    /// Like count reported by the server, 0 when unknown.
    pub likes: i64,
    /// False when the JSON parsed but carried no integer `likes` field.
    pub likes_reported: bool,
    pub outcome: CheckOutcome,
}

impl LikesResult {
    pub fn unreachable(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status: 0,
            likes: 0,
            likes_reported: false,
            outcome: CheckOutcome::ConnectionFailed,
        }
    }

    /// Only the status code counts towards the verdict; a 200 with an
    /// unparseable body still passes.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// One printed PASS/FAIL line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLine {
    pub name: String,
    pub passed: bool,
    pub detail: String,
    /// Printed under the line only when it failed.
    pub fix_hint: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverallResult {
    pub passed: bool,
}

impl OverallResult {
    pub fn evaluate(home: &HomePageResult, post: &LikesResult, get: &LikesResult) -> Self {
        Self {
            passed: home.is_ok() && post.is_ok() && get.is_ok(),
        }
    }
}
