//! Room permission grants

use livekit_api::access_token::VideoGrants;

/// A grant with join, publish, publish-data and subscribe enabled for `room`
pub fn full_access(room: &str) -> VideoGrants {
    VideoGrants {
        room: room.to_string(),
        room_join: true,
        can_publish: true,
        can_publish_data: true,
        can_subscribe: true,
        ..Default::default()
    }
}

/// True when all four participant capabilities are enabled
pub fn is_full_access(grant: &VideoGrants) -> bool {
    grant.room_join && grant.can_publish && grant.can_publish_data && grant.can_subscribe
}

/// Short `room:cap,cap` form used when printing a grant
pub fn describe(grant: &VideoGrants) -> String {
    let mut caps = Vec::with_capacity(4);
    if grant.room_join {
        caps.push("join");
    }
    if grant.can_publish {
        caps.push("publish");
    }
    if grant.can_publish_data {
        caps.push("publish_data");
    }
    if grant.can_subscribe {
        caps.push("subscribe");
    }
    format!("{}:{}", grant.room, caps.join(","))
}
