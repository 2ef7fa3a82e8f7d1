use anyhow::Result;

pub fn format_amount(amount: i128, decimals: u32) -> String {
    let Some(divisor) = 10_i128.checked_pow(decimals) else {
        return amount.to_string();
    };
    let whole = amount / divisor;
    let fractional = amount % divisor;

    if fractional == 0 {
        whole.to_string()
    } else {
        // Format with full precision, then remove trailing zeros
        let formatted = format!(
            "{}.{:0width$}",
            whole,
            fractional,
            width = decimals as usize
        );
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Parses a non-negative decimal amount into the token's smallest unit.
pub fn parse_amount(amount_str: &str, decimals: u32) -> Result<i128> {
    let amount_str = amount_str.trim();
    if amount_str.starts_with('-') {
        return Err(anyhow::anyhow!("Amount cannot be negative: {}", amount_str));
    }

    let scale = 10_i128
        .checked_pow(decimals)
        .ok_or_else(|| anyhow::anyhow!("Unsupported number of decimals: {}", decimals))?;
    let too_large = || anyhow::anyhow!("Amount too large: {}", amount_str);
    let parts: Vec<&str> = amount_str.split('.').collect();

    match parts.len() {
        1 => {
            let whole: i128 = parts[0].parse()?;
            whole.checked_mul(scale).ok_or_else(too_large)
        }
        2 => {
            let whole: i128 = parts[0].parse()?;
            let fractional_str = parts[1];

            if fractional_str.is_empty() || !fractional_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(anyhow::anyhow!("Invalid amount format"));
            }
            if fractional_str.len() > decimals as usize {
                return Err(anyhow::anyhow!("Too many decimal places"));
            }

            // Both factors are below `scale`, so this cannot overflow
            let fractional: i128 = fractional_str.parse()?;
            let fractional_scaled =
                fractional * 10_i128.pow(decimals - fractional_str.len() as u32);

            whole
                .checked_mul(scale)
                .and_then(|scaled| scaled.checked_add(fractional_scaled))
                .ok_or_else(too_large)
        }
        _ => Err(anyhow::anyhow!("Invalid amount format")),
    }
}

pub fn format_duration(seconds: u64) -> String {
    let days = seconds / (24 * 60 * 60);
    let hours = (seconds % (24 * 60 * 60)) / (60 * 60);
    let minutes = (seconds % (60 * 60)) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, secs)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

pub fn parse_duration(duration_str: &str) -> Result<u64> {
    let duration_str = duration_str.trim().to_lowercase();

    let (number, unit) = match duration_str.char_indices().last() {
        Some((i, c)) if c.is_ascii_alphabetic() => (&duration_str[..i], c),
        _ => (duration_str.as_str(), 's'),
    };
    let value: u64 = number.parse()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        other => return Err(anyhow::anyhow!("Unknown duration unit '{}'", other)),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Duration too large: {}", duration_str))
}

fn validate_strkey(address: &str, prefix: char, kind: &str) -> Result<()> {
    if address.is_empty() {
        return Err(anyhow::anyhow!("{} cannot be empty", kind));
    }

    if !address.starts_with(prefix) {
        return Err(anyhow::anyhow!("{} must start with '{}'", kind, prefix));
    }

    if address.len() != 56 {
        return Err(anyhow::anyhow!("{} must be 56 characters long", kind));
    }

    if !address
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(anyhow::anyhow!(
            "{} must contain only uppercase letters and digits",
            kind
        ));
    }

    Ok(())
}

/// Account address (`G...`).
pub fn validate_address(address: &str) -> Result<()> {
    validate_strkey(address, 'G', "Address")
}

/// Contract address (`C...`).
pub fn validate_contract_id(contract_id: &str) -> Result<()> {
    validate_strkey(contract_id, 'C', "Contract ID")
}

pub fn truncate_address(address: &str, chars: usize) -> String {
    if address.len() <= chars * 2 {
        return address.to_string();
    }

    format!(
        "{}...{}",
        &address[..chars],
        &address[address.len() - chars..]
    )
}

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No data to display".to_string();
    }

    let mut widths = headers.iter().map(|h| h.len()).collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!(" {:<width$} ", cell, width = width))
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut result = String::new();
    result.push_str(&border("┌", "┬", "┐"));
    result.push_str(&line(headers.to_vec()));
    result.push_str(&border("├", "┼", "┤"));
    for row in rows {
        result.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    result.push_str(border("└", "┴", "┘").trim_end());

    result
}
