//! Fixed instruction prompts for the generative endpoint.

/// Vision instruction for prescription images. The reply format
/// (`MedicineName - Dosage - Timing`) is what the structuring parser
/// expects back.
pub const PRESCRIPTION_IMAGE_PROMPT: &str = "\
Carefully extract all medicine information from this prescription image. \
For each medicine, provide: \
1. Medicine Name (clean, no extra words) \
2. Dosage (mg, ml, units) \
3. Timing (morning, afternoon, evening, night, or specific times) \
4. Frequency (once daily, twice daily, etc) \
Format as: MedicineName - Dosage - Timing";

/// Vision instruction for lab-report images: plain text out, values
/// and units preserved.
pub const LAB_REPORT_IMAGE_PROMPT: &str = "\
Extract all visible text from this lab report image. \
Preserve test names, values, units and reference ranges. \
Be thorough and accurate. Output plain text.";

/// Doctor-side prescription cleanup: turn raw prescription text into a
/// patient-readable medicine list.
pub fn prescription_analysis_prompt(
    patient_name: &str,
    patient_age: i32,
    prescription_text: &str,
) -> String {
    format!(
        "Extract medicines from this prescription and create a clean list:\n\n\
         Patient: {patient_name} (Age: {patient_age})\n\n\
         Prescription Text:\n{prescription_text}\n\n\
         Please extract and list:\n\
         1. Medicine names (clean, without dosage)\n\
         2. Dosage for each medicine\n\
         3. Instructions (how to take)\n\
         4. Total number of medicines\n\n\
         Format the response as a clear medicine list that can be easily understood."
    )
}

/// Lab-report interpretation for the doctor's review queue.
pub fn lab_analysis_prompt(patient_name: &str, patient_age: i32, report_text: &str) -> String {
    format!(
        "Analyze this lab report and give basic medical insights:\n\n\
         Patient: {patient_name} (Age: {patient_age})\n\n\
         Lab Report:\n{report_text}\n\n\
         Provide simple analysis:\n\
         1. Main findings\n\
         2. Any abnormal values\n\
         3. What doctor should check\n\
         4. Urgency: Low/Medium/High\n\n\
         Keep it short and clear."
    )
}
