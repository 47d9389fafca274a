/// printf `%g` 的有效位數
pub const GENERAL_PRECISION: usize = 6;

/// 以 printf `%g` 規則格式化浮點數：
/// 六位有效數字，去掉尾端的零與小數點，指數小於 -4 或不小於精度時改用科學記號。
///
/// `10.0` 輸出 `"10"`，`100.0 - 99.9` 輸出 `"0.1"`，`0.00001` 輸出 `"1e-05"`。
pub fn format_general(value: f64) -> String {
    format_general_with_precision(value, GENERAL_PRECISION)
}

pub fn format_general_with_precision(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let precision = precision.max(1);

    // 先以科學記號四捨五入，取得進位後的真實指數
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
