use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmployeeKind {
    /// Paid per day worked.
    Visiting { daily_wage: f32, worked_days: u32 },

    /// Paid a fixed monthly salary.
    Permanent { monthly_salary: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub kind: EmployeeKind,
}

impl Employee {
    pub fn new(id: u32, name: impl Into<String>, kind: EmployeeKind) -> Self {
        Employee {
            id,
            name: name.into(),
            kind,
        }
    }

    pub fn compute_salary(&self) -> f64 {
        match self.kind {
            // Multiplied in f32 like the wage itself.
            EmployeeKind::Visiting {
                daily_wage,
                worked_days,
            } => f64::from(worked_days as f32 * daily_wage),
            EmployeeKind::Permanent { monthly_salary } => f64::from(monthly_salary),
        }
    }

    pub fn salary_label(&self) -> &'static str {
        match self.kind {
            EmployeeKind::Visiting { .. } => "Salary",
            EmployeeKind::Permanent { .. } => "Monthly Salary",
        }
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Employee ID: {}\nName: {}", self.id, self.name)
    }
}
