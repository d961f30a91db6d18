// ==========================================
// 公交线路目录 - CSV 导入导出模块
// ==========================================

pub mod csv_codec;
pub mod error;
pub mod point_parser;

pub use csv_codec::{
    export, export_to_path, import, import_from_path, ImportSummary, CSV_HEADER,
};
pub use error::{ImportError, ImportResult};
pub use point_parser::{parse_point_field, ParsedPoint};
