//! Demo content shown when a session starts empty

/// Body the editor is seeded with
pub const DEMO_CONTENT: &str = "Excited to share our latest creative project! 🎨 This beautiful DIY tutorial will inspire your next Pinterest board. The response has been incredible so far!";
