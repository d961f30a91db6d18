// ==========================================
// 公交线路目录 - CSV 导入/导出
// ==========================================
// 表头: ID,Route Number,Start Point,End Point,Special Category,Route Type
// 行:   {id},{number},"{start}","{end}","{codes}","{route type}"
// 导入: 逐行处理，坏行静默跳过；结束后以仓储为准重新加载
// ==========================================

use crate::api::RouteApi;
use crate::domain::{Route, RouteCollection, RoutePoint};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::point_parser::{find_by_description, parse_point_field, ParsedPoint};
use csv::ReaderBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// 导出表头
pub const CSV_HEADER: &str = "ID,Route Number,Start Point,End Point,Special Category,Route Type";

/// 每行最少字段数
const MIN_FIELDS: usize = 6;

/// 导入结果汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub total_rows: usize,     // 数据行（不含表头）
    pub imported: usize,       // 成功写入的线路
    pub skipped: usize,        // 跳过的行
    pub created_points: usize, // 导入过程中新建的场站
}

// ==========================================
// 导出
// ==========================================

/// 包裹双引号；字段内的 '"' 按 RFC 4180 双写
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn format_row(route: &Route) -> String {
    format!(
        "{},{},{},{},{},{}",
        route.id(),
        route.route_number(),
        quoted(&route.start_point().to_string()),
        quoted(&route.end_point().to_string()),
        quoted(&route.special_category_string()),
        quoted(route.route_type().display_name()),
    )
}

/// 按当前顺序导出线路
///
/// # 返回
/// 写出的数据行数
#[instrument(skip(routes, writer), fields(rows = routes.len()))]
pub fn export<W: Write>(routes: &RouteCollection, mut writer: W) -> ImportResult<usize> {
    let write_err = |e: std::io::Error| ImportError::FileWriteError(e.to_string());

    writeln!(writer, "{}", CSV_HEADER).map_err(write_err)?;
    for route in routes {
        writeln!(writer, "{}", format_row(route)).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    info!("CSV 导出完成: {} 行", routes.len());
    Ok(routes.len())
}

pub fn export_to_path<P: AsRef<Path>>(routes: &RouteCollection, path: P) -> ImportResult<usize> {
    let file = File::create(path.as_ref())
        .map_err(|e| ImportError::FileWriteError(format!("{}: {}", path.as_ref().display(), e)))?;
    export(routes, BufWriter::new(file))
}

// ==========================================
// 导入
// ==========================================

/// 单行导入上下文：已知场站（含本次导入新建的）
struct PointResolver {
    known: Vec<RoutePoint>,
    created: usize,
}

impl PointResolver {
    /// 按 description 复用已知场站，否则新建并登记
    fn resolve(&mut self, parsed: &ParsedPoint, api: &RouteApi) -> Option<RoutePoint> {
        if let Some(existing) = find_by_description(&self.known, &parsed.description) {
            return Some(existing.clone());
        }

        match api.add_route_point(&parsed.to_route_point()) {
            Ok(point) => {
                self.known.push(point.clone());
                self.created += 1;
                Some(point)
            }
            Err(e) => {
                debug!("新建场站失败 ({}): {}", parsed.description, e);
                None
            }
        }
    }
}

/// 将一条记录转为线路并写入；任一步失败返回 None（该行跳过）
fn import_record(
    record: &csv::StringRecord,
    resolver: &mut PointResolver,
    api: &RouteApi,
) -> Option<i64> {
    if record.len() < MIN_FIELDS {
        debug!("字段数不足 ({} < {}), 跳过", record.len(), MIN_FIELDS);
        return None;
    }

    let route_number: i32 = match record[1].trim().parse() {
        Ok(n) => n,
        Err(_) => {
            debug!("线路号无法解析: {:?}, 跳过", &record[1]);
            return None;
        }
    };

    let start = parse_point_field(record[2].trim());
    let end = parse_point_field(record[3].trim());
    let codes = match Route::parse_category_string(record[4].trim()) {
        Some(codes) => codes,
        None => {
            debug!("类别代码无效: {:?}, 跳过", &record[4]);
            return None;
        }
    };

    let start_point = resolver.resolve(&start, api)?;
    let end_point = resolver.resolve(&end, api)?;
    let route = Route::new(0, route_number, start_point, end_point, codes);

    match api.persist_new_route(&route) {
        Ok(id) => Some(id),
        Err(e) => {
            debug!("线路 {} 未导入: {}", route_number, e);
            None
        }
    }
}

/// 将一行文本按 CSV 规则切分（引号内逗号不切分）
///
/// 每行独立解析，未闭合的引号不会延续到下一行。
/// 空行或无法解析的行返回 None。
fn split_line(line: &str) -> Option<csv::StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // 允许行长度不一致
        .from_reader(line.as_bytes());

    match reader.records().next()? {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("CSV 行解析失败: {}", e);
            None
        }
    }
}

/// 从 CSV 导入线路
///
/// 按物理行处理，首行视为表头跳过，空行忽略。
/// 单行失败（字段不足/线路号非数字/号码越界或重复/写库失败）只跳过该行。
/// 全部处理后从仓储重新加载线路。
#[instrument(skip(reader, api))]
pub fn import<R: Read>(reader: R, api: &mut RouteApi) -> ImportResult<ImportSummary> {
    let mut resolver = PointResolver {
        known: api.route_points()?,
        created: 0,
    };
    let mut summary = ImportSummary::default();

    for line in BufReader::new(reader).lines().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.total_rows += 1;

        let imported = split_line(&line)
            .and_then(|record| import_record(&record, &mut resolver, api))
            .is_some();
        if imported {
            summary.imported += 1;
        } else {
            summary.skipped += 1;
        }
    }

    summary.created_points = resolver.created;
    api.load_all_routes()?;

    info!(
        "CSV 导入完成: 共 {} 行, 成功 {}, 跳过 {}, 新建场站 {}",
        summary.total_rows, summary.imported, summary.skipped, summary.created_points
    );
    Ok(summary)
}

pub fn import_from_path<P: AsRef<Path>>(path: P, api: &mut RouteApi) -> ImportResult<ImportSummary> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    import(file, api)
}
