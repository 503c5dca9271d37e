//! # Help Text
//!
//! Help messages for bot commands, rendered with the configured prefix.
//! Displayed to the user via the `help` command.

pub fn general(p: char) -> String {
    format!(
        concat!(
            "**🔊 Soundbot Help**\n",
            "**{p}play _word_** - Search a sound by _word_ and play it in your voice channel. ",
            "Without a word, plays a random sound. Shortening: **{p}p**\n",
            "**{p}playchannel _channel_,_sound_** - Join _channel_ and play _sound_, ",
            "or a random one if no sound is given. Shortening: **{p}pc**\n",
            "**{p}list** - List available sounds. Shortening: **{p}l**\n",
            "**{p}help** - Show this help. Shortening: **{p}h**"
        ),
        p = p
    )
}

pub fn admin(p: char) -> String {
    format!(
        concat!(
            "\n\n**🛠 Admin**\n",
            "**{p}trollOn _min_,_max_,_chance_,_mode_** - Play random sounds every _min_-_max_ minutes ",
            "with probability _chance_ in channels chosen by _mode_ (`all`, `random` or a name filter)\n",
            "**{p}trollOff** - Stop troll mode\n",
            "**{p}refresh** - Reload the sound catalog\n",
            "**{p}add** - Add a new sound (send `cancel` at any step to stop)"
        ),
        p = p
    )
}
