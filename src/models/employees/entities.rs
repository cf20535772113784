use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 员工角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub enum EmployeeRole {
    Employee, // 普通员工
    HrAdmin,  // 人事管理员
}

impl EmployeeRole {
    pub const EMPLOYEE: &'static str = "employee";
    pub const HR_ADMIN: &'static str = "hr_admin";

    pub fn admin_roles() -> &'static [&'static EmployeeRole] {
        &[&Self::HrAdmin]
    }
    pub fn all_roles() -> &'static [&'static EmployeeRole] {
        &[&Self::Employee, &Self::HrAdmin]
    }
}

impl<'de> Deserialize<'de> for EmployeeRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            EmployeeRole::EMPLOYEE => Ok(EmployeeRole::Employee),
            EmployeeRole::HR_ADMIN => Ok(EmployeeRole::HrAdmin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的员工角色: '{s}'. 支持的角色: employee, hr_admin"
            ))),
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeRole::Employee => write!(f, "{}", EmployeeRole::EMPLOYEE),
            EmployeeRole::HrAdmin => write!(f, "{}", EmployeeRole::HR_ADMIN),
        }
    }
}

impl std::str::FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(EmployeeRole::Employee),
            "hr_admin" => Ok(EmployeeRole::HrAdmin),
            _ => Err(format!("Invalid employee role: {s}")),
        }
    }
}

// 员工账号状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub enum EmployeeStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for EmployeeStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            "suspended" => Ok(EmployeeStatus::Suspended),
            _ => Err(serde::de::Error::custom(format!(
                "无效的员工状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))),
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeStatus::Active => write!(f, "active"),
            EmployeeStatus::Inactive => write!(f, "inactive"),
            EmployeeStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            "suspended" => Ok(EmployeeStatus::Suspended),
            _ => Err(format!("Invalid employee status: {s}")),
        }
    }
}

// 审批链槽位，顺序固定：approver1 → approver2 → approver3 → manager → gm
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub enum ChainSlot {
    Appr1,
    Appr2,
    Appr3,
    Manager,
    Gm,
}

impl ChainSlot {
    /// 槽位的声明顺序，审批链解析只依赖这个数组
    pub const ALL: [ChainSlot; 5] = [
        ChainSlot::Appr1,
        ChainSlot::Appr2,
        ChainSlot::Appr3,
        ChainSlot::Manager,
        ChainSlot::Gm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainSlot::Appr1 => "appr1",
            ChainSlot::Appr2 => "appr2",
            ChainSlot::Appr3 => "appr3",
            ChainSlot::Manager => "mgr",
            ChainSlot::Gm => "gm",
        }
    }

    /// 声明顺序中的下标
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .expect("slot not in ALL")
    }
}

impl std::fmt::Display for ChainSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChainSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appr1" => Ok(ChainSlot::Appr1),
            "appr2" => Ok(ChainSlot::Appr2),
            "appr3" => Ok(ChainSlot::Appr3),
            "mgr" => Ok(ChainSlot::Manager),
            "gm" => Ok(ChainSlot::Gm),
            _ => Err(format!("Invalid chain slot: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for ChainSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ChainSlot>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的审批槽位: '{s}'. 支持的槽位: appr1, appr2, appr3, mgr, gm"
            ))
        })
    }
}

// 员工实体（目录记录 + 登录主体）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub struct Employee {
    pub id: i64,
    pub emp_code: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: EmployeeRole,
    pub status: EmployeeStatus,
    /// 考核等级，决定适用的题目集
    pub level: String,
    /// 警告次数，结果合成时作为扣分输入
    pub warning_count: i32,
    // 稀疏审批链：空槽位为 None（空字符串同样视为未配置）
    pub approver1: Option<String>,
    pub approver2: Option<String>,
    pub approver3: Option<String>,
    pub manager: Option<String>,
    pub gm: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Employee {
    /// 某个槽位上配置的审批人工号，空字符串视为未配置
    pub fn chain_ref(&self, slot: ChainSlot) -> Option<&str> {
        let occupant = match slot {
            ChainSlot::Appr1 => self.approver1.as_deref(),
            ChainSlot::Appr2 => self.approver2.as_deref(),
            ChainSlot::Appr3 => self.approver3.as_deref(),
            ChainSlot::Manager => self.manager.as_deref(),
            ChainSlot::Gm => self.gm.as_deref(),
        };
        occupant.filter(|code| !code.is_empty())
    }

    /// 审批链解析：返回 `after` 之后第一个配置了审批人的槽位。
    ///
    /// `after` 为 None 表示从链头开始扫描。返回 None 表示链已走完，
    /// 工作流应当进入 completed。每次状态转移时基于当前员工记录重新解析，
    /// 中途修改审批链会改变剩余路径。
    pub fn next_populated_slot(&self, after: Option<ChainSlot>) -> Option<(ChainSlot, &str)> {
        let start = match after {
            Some(slot) => slot.index() + 1,
            None => 0,
        };
        ChainSlot::ALL[start..]
            .iter()
            .find_map(|&slot| self.chain_ref(slot).map(|code| (slot, code)))
    }

    /// 判断工号是否占据某个审批槽位
    pub fn slot_of(&self, emp_code: &str) -> Option<ChainSlot> {
        ChainSlot::ALL
            .iter()
            .copied()
            .find(|&slot| self.chain_ref(slot) == Some(emp_code))
    }

    // 生成访问令牌对（JWT）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<crate::utils::jwt::TokenPair, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_with_chain(
        approver1: Option<&str>,
        approver2: Option<&str>,
        approver3: Option<&str>,
        manager: Option<&str>,
        gm: Option<&str>,
    ) -> Employee {
        Employee {
            id: 1,
            emp_code: "E001".to_string(),
            email: "e001@example.com".to_string(),
            password_hash: String::new(),
            display_name: None,
            role: EmployeeRole::Employee,
            status: EmployeeStatus::Active,
            level: "L2".to_string(),
            warning_count: 0,
            approver1: approver1.map(String::from),
            approver2: approver2.map(String::from),
            approver3: approver3.map(String::from),
            manager: manager.map(String::from),
            gm: gm.map(String::from),
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_next_slot_from_start() {
        let emp = employee_with_chain(Some("A"), Some("B"), None, Some("M"), Some("G"));
        assert_eq!(
            emp.next_populated_slot(None),
            Some((ChainSlot::Appr1, "A"))
        );
    }

    #[test]
    fn test_next_slot_skips_empty() {
        // 稀疏链 [X, -, -, M, G]：appr1 之后直接跳到 manager
        let emp = employee_with_chain(Some("X"), None, None, Some("Y"), Some("Z"));
        assert_eq!(
            emp.next_populated_slot(Some(ChainSlot::Appr1)),
            Some((ChainSlot::Manager, "Y"))
        );
        assert_eq!(
            emp.next_populated_slot(Some(ChainSlot::Manager)),
            Some((ChainSlot::Gm, "Z"))
        );
        assert_eq!(emp.next_populated_slot(Some(ChainSlot::Gm)), None);
    }

    #[test]
    fn test_empty_chain_resolves_to_none() {
        let emp = employee_with_chain(None, None, None, None, None);
        assert_eq!(emp.next_populated_slot(None), None);
    }

    #[test]
    fn test_blank_string_slot_is_unpopulated() {
        let emp = employee_with_chain(Some(""), Some("B"), None, None, None);
        assert_eq!(
            emp.next_populated_slot(None),
            Some((ChainSlot::Appr2, "B"))
        );
    }

    #[test]
    fn test_full_chain_visits_slots_in_declared_order() {
        let emp = employee_with_chain(Some("A1"), Some("A2"), Some("A3"), Some("M"), Some("G"));
        let mut visited = Vec::new();
        let mut cursor = None;
        while let Some((slot, code)) = emp.next_populated_slot(cursor) {
            visited.push((slot, code.to_string()));
            cursor = Some(slot);
        }
        assert_eq!(
            visited,
            vec![
                (ChainSlot::Appr1, "A1".to_string()),
                (ChainSlot::Appr2, "A2".to_string()),
                (ChainSlot::Appr3, "A3".to_string()),
                (ChainSlot::Manager, "M".to_string()),
                (ChainSlot::Gm, "G".to_string()),
            ]
        );
    }

    #[test]
    fn test_slot_of() {
        let emp = employee_with_chain(Some("X"), None, None, Some("Y"), None);
        assert_eq!(emp.slot_of("X"), Some(ChainSlot::Appr1));
        assert_eq!(emp.slot_of("Y"), Some(ChainSlot::Manager));
        assert_eq!(emp.slot_of("Z"), None);
    }
}
