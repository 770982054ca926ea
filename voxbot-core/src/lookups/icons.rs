use once_cell::sync::Lazy;
use std::collections::HashSet;

// Team badges come from two icon families; a team value is accepted if
// either family carries an icon with that name.

static SIMPLE_ICONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "angular", "apple", "archlinux", "debian", "deno", "docker",
        "firefox", "git", "github", "gitlab", "gnome", "go", "graphql",
        "javascript", "kubernetes", "linux", "mozilla", "neovim", "nodedotjs",
        "php", "postgresql", "python", "react", "ruby", "rust", "svelte",
        "swift", "twitch", "typescript", "ubuntu", "vim", "vuedotjs",
        "webassembly",
    ]
    .into_iter()
    .collect()
});

static FONT_AWESOME: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "anchor", "bolt", "bomb", "bug", "cat", "coffee", "cog", "crow",
        "dog", "dove", "dragon", "dumpster-fire", "fish", "frog", "gamepad",
        "ghost", "hat-wizard", "heart", "hippo", "horse", "kiwi-bird",
        "meteor", "moon", "otter", "paw", "robot", "rocket", "skull",
        "snowflake", "spider", "star", "sun", "tree",
    ]
    .into_iter()
    .collect()
});

/// True if the name is a known icon in either family.
pub fn is_team_icon(name: &str) -> bool {
    FONT_AWESOME.contains(name) || SIMPLE_ICONS.contains(name)
}
