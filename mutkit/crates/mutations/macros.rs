//! Guards for edits that do not apply to the current value. Each one makes the enclosing edit
//! report `false`, so the strategy draws another one.

macro_rules! check_not_empty {
    ($val:expr) => {
        if $val.is_empty() {
            return false;
        }
    };
}

macro_rules! check_not_smaller {
    ($val:expr, $n:expr) => {
        if $val.len() < $n {
            return false;
        }
    };
}

macro_rules! check_room {
    ($free:expr, $n:expr) => {
        if $free < $n {
            return false;
        }
    };
}
