pub(crate) mod moment;
pub(crate) mod timezone;

pub(crate) use moment::format_moment;
pub(crate) use timezone::Timezone;
