pub mod config;
pub mod diag;
pub mod error;
pub mod ident;
pub mod io;
pub mod models;
pub mod preprocess;

pub use config::merge_dict_inplace;
pub use diag::{DiagnosticSink, LogSink, Warning};
pub use error::{Error, Result};
pub use ident::{get_annotated, get_label_identifier, get_unique_identifier};
pub use io::{
    load_lab, load_lst, load_mapping, load_mdtm, load_rttm, load_rttm_with_type, load_stm,
    load_uem,
};
pub use models::{Annotation, FileRecord, LabeledSegment, Segment, TimedWord, Timeline};
pub use preprocess::{CtmLoader, LabelMapper, MapLoader, Preprocessor, RttmLoader, UemLoader};
