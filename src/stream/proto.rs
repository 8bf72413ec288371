//! Generated client code for `proto/mirror.proto`, compiled at build time by
//! `tonic-build` (see `build.rs`).

pub mod mirror {
    tonic::include_proto!("mirror");
}
