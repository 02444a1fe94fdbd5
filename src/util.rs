pub(crate) mod str;
pub(crate) mod sync;
pub(crate) mod uri;
pub(crate) mod utf8;

pub(crate) use self::str::StringExt;
