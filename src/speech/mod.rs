pub mod announcer;
