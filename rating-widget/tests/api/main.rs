mod helpers;
mod source;
