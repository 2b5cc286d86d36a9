use super::IntentKey;

macro_rules! intent_keys {
    ($($name:ident => $key:literal),* $(,)?) => {
        $(pub const $name: IntentKey = IntentKey::from_static($key);)*
    };
}

intent_keys! {
    WAKE_ON => "wake_on",
    WAKE_OFF => "wake_off",
    SHUTDOWN_SYSTEM => "shutdown_system",
    RESTART_SYSTEM => "restart_system",
    SLEEP_SYSTEM => "sleep_system",
    LOCK_SYSTEM => "lock_system",
    LOGOUT_SYSTEM => "logout_system",
    EXIT_APP => "exit_app",
    ADJUST_VOLUME => "adjust_volume",
    ADJUST_BRIGHTNESS => "adjust_brightness",
    CHANGE_LANGUAGE => "change_language",
    REMEMBER_NAME => "remember_name",
    RECALL_NAME => "recall_name",
    STORE_PREFERENCE => "store_preference",
    UPDATE_MEMORY => "update_memory",
    CLEAR_MEMORY => "clear_memory",
    SAVE_NOTE => "save_note",
    READ_NOTES => "read_notes",
    SEARCH_NOTES => "search_notes",
    UPDATE_NOTE => "update_note",
    DELETE_NOTE => "delete_note",
    SET_ALARM => "set_alarm",
    SET_REMINDER => "set_reminder",
    OPEN_YOUTUBE => "open_youtube",
    OPEN_CHATGPT => "open_chatgpt",
    SEARCH_GOOGLE => "search_google",
    PLAY_MUSIC => "play_music",
    GET_WEATHER => "get_weather",
    GET_NEWS => "get_news",
    DATE_QUERIES => "date_queries",
    HOLIDAY_QUERIES => "holiday_queries",
    PHYSICS_GRAPH_CONFIRM => "physics_graph_confirm",
    PLOT_COMMAND => "plot_command",
    SYMBOLIC_MATH => "symbolic_math",
    MATH_QUERY => "math_query",
    PHYSICS_QUERY => "physics_query",
    CHEMISTRY_QUERY => "chemistry_query",
    CHEMISTRY_FACT => "chemistry_fact",
    WIKI_SEARCH => "wiki_search",
    TELL_ME_SOMETHING => "tell_me_something",
    POKEMON_LIST => "pokemon_list",
    POKEMON_LIST_TYPE => "pokemon_list_type",
    POKEMON_SHOW => "pokemon_show",
    POKEMON_ADD => "pokemon_add",
    POKEMON_UPDATE => "pokemon_update",
    POKEMON_DELETE => "pokemon_delete",
    POKEMON_IMAGE => "pokemon_image",
    POKEMON_IMAGE_MULTI => "pokemon_image_multi",
    POKEMON_GALLERY_OPEN => "pokemon_gallery_open",
    POKEMON_DOWNLOAD => "pokemon_download",
    POKEMON_IMPORT_CSV => "pokemon_import_csv",
    POKEMON_HELP => "pokemon_help",
    TEAM_LIST => "team_list",
    TEAM_ADD => "team_add",
    TEAM_REMOVE => "team_remove",
    TEAM_UPGRADE => "team_upgrade",
    TEAM_AVERAGE => "team_average",
    TRAINER_ME => "trainer_me",
    TRAINER_UPDATE => "trainer_update",
}

/// Irreversible system actions: strict matching only, never auto-run from a suggestion.
pub const DESTRUCTIVE: [IntentKey; 6] = [
    SHUTDOWN_SYSTEM,
    RESTART_SYSTEM,
    SLEEP_SYSTEM,
    LOCK_SYSTEM,
    LOGOUT_SYSTEM,
    EXIT_APP,
];

/// Intents whose trailing text is the payload, so " and " inside it is not a command boundary.
pub const FREE_TEXT: [IntentKey; 9] = [
    REMEMBER_NAME,
    STORE_PREFERENCE,
    UPDATE_MEMORY,
    SAVE_NOTE,
    SEARCH_NOTES,
    UPDATE_NOTE,
    SET_REMINDER,
    SEARCH_GOOGLE,
    WIKI_SEARCH,
];
