// ==========================================
// 公交线路目录 - 线路输入校验器
// ==========================================
// 职责: 用户输入/导入行的线路校验（不访问数据库）
// 说明: 线路号唯一性需要查询仓储，由 RouteApi 负责
// ==========================================

use crate::api::error::ValidationError;
use crate::domain::{RoutePoint, ROUTE_NUMBER_MAX, ROUTE_NUMBER_MIN};

/// 通过校验的线路输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRouteInput {
    pub route_number: i32,
    pub start_point: RoutePoint,
    pub end_point: RoutePoint,
}

pub struct RouteValidator;

impl RouteValidator {
    /// 解析线路号文本（去首尾空白）并校验值域
    pub fn parse_route_number(text: &str) -> Result<i32, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRouteNumber);
        }

        let number: i32 = trimmed
            .parse()
            .map_err(|_| ValidationError::RouteNumberNotNumeric(trimmed.to_string()))?;

        Self::check_route_number(number)?;
        Ok(number)
    }

    /// 校验线路号值域 [1, 999]
    pub fn check_route_number(number: i32) -> Result<(), ValidationError> {
        if !(ROUTE_NUMBER_MIN..=ROUTE_NUMBER_MAX).contains(&number) {
            return Err(ValidationError::RouteNumberOutOfRange(number));
        }
        Ok(())
    }

    /// 校验表单输入：线路号 + 起终点
    pub fn validate_input(
        number_text: &str,
        start: Option<&RoutePoint>,
        end: Option<&RoutePoint>,
    ) -> Result<ValidatedRouteInput, ValidationError> {
        let route_number = Self::parse_route_number(number_text)?;

        match (start, end) {
            (Some(start), Some(end)) => Ok(ValidatedRouteInput {
                route_number,
                start_point: start.clone(),
                end_point: end.clone(),
            }),
            _ => Err(ValidationError::MissingEndpoint),
        }
    }
}
